// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod evaluate;
pub mod mediator;
pub mod processor;

pub use evaluate::{Evaluate, ValidationFunction};
pub use mediator::ProcessingMediator;
pub use processor::AttributeProcessor;
