// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::sync::Arc;

use crate::engine::{Evaluation, Invocation};

/// A compiled validation function.
///
/// `None` stands for an absent value; `Some(Value::Null)` for an explicit null.
pub trait Evaluate: Send + Sync {
    fn evaluate(&self, value: Option<Value>, invocation: &Invocation) -> Evaluation;
}

impl<F> Evaluate for F
where
    F: Fn(Option<Value>, &Invocation) -> Evaluation + Send + Sync,
{
    fn evaluate(&self, value: Option<Value>, invocation: &Invocation) -> Evaluation {
        self(value, invocation)
    }
}

/// Shared handle to a compiled validation function.
pub type ValidationFunction = Arc<dyn Evaluate>;
