// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Two-state result of running a validation function.
//!
//! An [`Evaluation`] is either already settled or pending on a boxed future.
//! Synchronous schemas never allocate a future; as soon as one transformer
//! returns [`Evaluation::Pending`], everything downstream of it is chained as a
//! continuation with [`Evaluation::then`].

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::engine::Invocation;
use crate::errors::{Error, ExpectationError};

/// Final outcome of a validation function: the validated value (`None` when
/// absent or removed) or a taxonomy error.
pub type Outcome = Result<Option<Value>, Error>;

/// State threaded between the steps of a processing plan: the current value,
/// or the expectation error raised by an earlier step.
pub type Flow = Result<Option<Value>, ExpectationError>;

pub enum Evaluation {
    Settled(Outcome),
    Pending(BoxFuture<'static, Outcome>),
}

impl Evaluation {
    pub fn ready(value: Option<Value>) -> Self {
        Evaluation::Settled(Ok(value))
    }

    pub fn value(value: Value) -> Self {
        Evaluation::Settled(Ok(Some(value)))
    }

    pub fn fail(error: impl Into<Error>) -> Self {
        Evaluation::Settled(Err(error.into()))
    }

    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        Evaluation::Pending(future.boxed())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Evaluation::Pending(_))
    }

    /// Chain `next` after this evaluation. Runs immediately when settled.
    pub fn then<F>(self, next: F) -> Evaluation
    where
        F: FnOnce(Outcome) -> Evaluation + Send + 'static,
    {
        match self {
            Evaluation::Settled(outcome) => next(outcome),
            Evaluation::Pending(future) => {
                Evaluation::pending(async move { next(future.await).resolve().await })
            }
        }
    }

    pub async fn resolve(self) -> Outcome {
        match self {
            Evaluation::Settled(outcome) => outcome,
            Evaluation::Pending(future) => future.await,
        }
    }
}

impl From<Outcome> for Evaluation {
    fn from(outcome: Outcome) -> Self {
        Evaluation::Settled(outcome)
    }
}

impl fmt::Debug for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Settled(outcome) => f.debug_tuple("Settled").field(outcome).finish(),
            Evaluation::Pending(_) => f.write_str("Pending"),
        }
    }
}

type TransformFn = dyn Fn(Flow, &Invocation) -> Evaluation + Send + Sync;

/// Per-value function a processor contributes to a processing plan.
///
/// The plan hands a non-catching transformer only `Ok` flows and a catching
/// transformer only `Err` flows.
#[derive(Clone)]
pub struct Transformer(Arc<TransformFn>);

impl Transformer {
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(Flow, &Invocation) -> Evaluation + Send + Sync + 'static,
    {
        Self(Arc::new(transform))
    }

    /// Transformer for a non-catching processor.
    pub fn on_value<F>(transform: F) -> Self
    where
        F: Fn(Option<Value>, &Invocation) -> Evaluation + Send + Sync + 'static,
    {
        Self::new(move |flow, invocation| match flow {
            Ok(value) => transform(value, invocation),
            Err(error) => Evaluation::fail(error),
        })
    }

    /// Transformer for a catching processor.
    pub fn on_error<F>(transform: F) -> Self
    where
        F: Fn(ExpectationError, &Invocation) -> Evaluation + Send + Sync + 'static,
    {
        Self::new(move |flow, invocation| match flow {
            Ok(value) => Evaluation::ready(value),
            Err(error) => transform(error, invocation),
        })
    }

    pub fn apply(&self, flow: Flow, invocation: &Invocation) -> Evaluation {
        (self.0)(flow, invocation)
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transformer")
    }
}
