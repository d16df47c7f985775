// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::sync::Arc;

use crate::engine::{Evaluation, Invocation};
use crate::errors::ExpectationError;
use crate::observability::messages::validation::WaysExhausted;
use crate::observability::messages::StructuredLog;
use crate::traits::{Evaluate, ValidationFunction};

/// Alternatives tried in declared order on the original value; the first way
/// to succeed wins.
///
/// Each way runs against a fork of the call's aggregator. A way whose nested
/// containers recorded errors has failed, and its records are dropped.
#[derive(Clone)]
pub struct MultiWay {
    inner: Arc<Ways>,
}

struct Ways {
    namespace: String,
    functions: Vec<ValidationFunction>,
    rendered: Vec<Value>,
}

impl MultiWay {
    /// `rendered` is the JSON form of the ways, reported as the expected
    /// values when all of them fail.
    pub fn new(namespace: &str, functions: Vec<ValidationFunction>, rendered: Vec<Value>) -> Self {
        Self {
            inner: Arc::new(Ways {
                namespace: namespace.to_string(),
                functions,
                rendered,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.functions.is_empty()
    }
}

impl Evaluate for MultiWay {
    fn evaluate(&self, value: Option<Value>, invocation: &Invocation) -> Evaluation {
        try_from(self.inner.clone(), 0, value, invocation)
    }
}

fn try_from(ways: Arc<Ways>, start: usize, value: Option<Value>, invocation: &Invocation) -> Evaluation {
    for index in start..ways.functions.len() {
        let branch = invocation.fork();
        match ways.functions[index].evaluate(value.clone(), &branch) {
            Evaluation::Settled(Ok(result)) if branch.aggregate().is_none() => {
                return Evaluation::ready(result)
            }
            Evaluation::Settled(_) => continue,
            Evaluation::Pending(future) => {
                let invocation = invocation.clone();
                return Evaluation::pending(async move {
                    match future.await {
                        Ok(result) if branch.aggregate().is_none() => Ok(result),
                        _ => try_from(ways, index + 1, value, &invocation).resolve().await,
                    }
                });
            }
        }
    }

    WaysExhausted {
        namespace: &ways.namespace,
        way_count: ways.functions.len(),
    }
    .log();
    Evaluation::fail(
        ExpectationError::validation(ways.namespace.as_str(), "value validated by a schema", value)
            .with_expected_values(ways.rendered.clone()),
    )
}
