// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod compiler;
pub mod container;
pub mod evaluation;
pub mod invocation;
pub mod plan;
pub mod validator;
pub mod ways;
#[cfg(test)]
pub mod integration_tests;

pub use compiler::Compiler;
pub use evaluation::{Evaluation, Flow, Outcome, Transformer};
pub use invocation::Invocation;
pub use validator::{Validation, Validator, ValidatorBuilder};
