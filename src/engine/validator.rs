// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use futures_util::future::{self, BoxFuture};
use futures_util::FutureExt;
use serde_json::Value;
use std::fmt;
use std::future::IntoFuture;
use std::sync::Arc;
use tracing::Instrument;

use crate::config::consts::DEFAULT_NAMESPACE;
use crate::config::Configuration;
use crate::engine::{Evaluation, Invocation, Outcome};
use crate::errors::{Error, Result};
use crate::observability::messages::validation::{AggregateRaised, ValidationStarted};
use crate::observability::messages::StructuredLog;
use crate::traits::ValidationFunction;

/// Result of [`Validator::validate`]: settled right away, or pending when a
/// processor suspended or the validator was compiled with `async: true`.
///
/// Awaiting a `Validation` works in both states.
pub enum Validation {
    Settled(Result<Value>),
    Pending(BoxFuture<'static, Result<Value>>),
}

impl Validation {
    pub fn is_pending(&self) -> bool {
        matches!(self, Validation::Pending(_))
    }

    /// The result, when already settled.
    pub fn settled(self) -> Option<Result<Value>> {
        match self {
            Validation::Settled(result) => Some(result),
            Validation::Pending(_) => None,
        }
    }
}

impl IntoFuture for Validation {
    type Output = Result<Value>;
    type IntoFuture = BoxFuture<'static, Result<Value>>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Validation::Settled(result) => future::ready(result).boxed(),
            Validation::Pending(pending) => pending,
        }
    }
}

impl fmt::Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::Settled(result) => f.debug_tuple("Settled").field(result).finish(),
            Validation::Pending(_) => f.write_str("Pending"),
        }
    }
}

/// Long-lived handle around a compiled validation function.
///
/// Cloning is cheap and clones share the compiled function. Every call to
/// [`validate`](Validator::validate) gets its own aggregate when `full` is
/// enabled, so concurrent calls never see each other's errors.
#[derive(Clone)]
pub struct Validator {
    function: ValidationFunction,
    namespace: Arc<str>,
    is_async: bool,
    full: bool,
}

impl Validator {
    pub fn validate(&self, value: Value) -> Validation {
        let started = ValidationStarted {
            namespace: &self.namespace,
            is_async: self.is_async,
            full: self.full,
        };
        started.log();

        let invocation = if self.full {
            Invocation::aggregating()
        } else {
            Invocation::new()
        };

        match self.function.evaluate(Some(value), &invocation) {
            Evaluation::Settled(outcome) if !self.is_async => {
                Validation::Settled(conclude(outcome, &invocation, &self.namespace))
            }
            evaluation => {
                let namespace = self.namespace.clone();
                let span = started.span("pending_validation");
                Validation::Pending(
                    async move {
                        let outcome = evaluation.resolve().await;
                        conclude(outcome, &invocation, &namespace)
                    }
                    .instrument(span)
                    .boxed(),
                )
            }
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_async(&self) -> bool {
        self.is_async
    }

    pub fn is_full(&self) -> bool {
        self.full
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("namespace", &self.namespace)
            .field("is_async", &self.is_async)
            .field("full", &self.full)
            .finish()
    }
}

/// Final result of a call: the function's own error first, then the
/// aggregate if anything was recorded, then the value.
fn conclude(outcome: Outcome, invocation: &Invocation, namespace: &str) -> Result<Value> {
    let value = outcome?;
    if let Some(full) = invocation.aggregate() {
        AggregateRaised {
            namespace,
            error_count: full.len(),
        }
        .log();
        return Err(Error::Full(full));
    }
    Ok(value.unwrap_or(Value::Null))
}

/// Builds [`Validator`] handles around compiled validation functions.
#[derive(Debug, Clone)]
pub struct ValidatorBuilder {
    namespace: String,
    is_async: bool,
    full: bool,
}

impl ValidatorBuilder {
    pub fn new() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            is_async: false,
            full: false,
        }
    }

    /// Builder carrying the call-level options of a resolved configuration.
    pub fn from_configuration(configuration: &Configuration) -> Self {
        Self {
            namespace: configuration.namespace().to_string(),
            is_async: configuration.is_async(),
            full: configuration.full(),
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn asynchronous(mut self, is_async: bool) -> Self {
        self.is_async = is_async;
        self
    }

    pub fn full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }

    pub fn build(&self, function: ValidationFunction) -> Validator {
        Validator {
            function,
            namespace: Arc::from(self.namespace.as_str()),
            is_async: self.is_async,
            full: self.full,
        }
    }
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
