// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error taxonomy for schema compilation and value validation.
//!
//! Callers only ever receive an [`Error`]:
//! * [`Error::Expectation`] - a single "expected X, got Y" failure, compile time
//!   or run time (see [`ExpectationKind`])
//! * [`Error::Unexpected`] - any foreign error raised from processor code
//! * [`Error::Full`] - every runtime failure of one call, when `full` is enabled
//!
//! [`LoadError`] is separate and only returned by the file loaders.

mod expectation;
mod full;
mod load;
mod unexpected;

pub use expectation::{type_name, ExpectationError, ExpectationKind, ExpectedType};
pub use full::FullValidationError;
pub use load::LoadError;
pub use unexpected::UnexpectedError;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Expectation(#[from] ExpectationError),

    #[error(transparent)]
    Unexpected(#[from] UnexpectedError),

    #[error(transparent)]
    Full(#[from] FullValidationError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Wrap a non-taxonomy error.
    pub fn unexpected(error: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Error::Unexpected(UnexpectedError::new(error))
    }

    pub fn as_expectation(&self) -> Option<&ExpectationError> {
        match self {
            Error::Expectation(error) => Some(error),
            _ => None,
        }
    }

    pub fn as_full(&self) -> Option<&FullValidationError> {
        match self {
            Error::Full(error) => Some(error),
            _ => None,
        }
    }

    pub fn as_unexpected(&self) -> Option<&UnexpectedError> {
        match self {
            Error::Unexpected(error) => Some(error),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<ExpectationKind> {
        self.as_expectation().map(ExpectationError::kind)
    }

    /// Backfill positional context when this is an expectation error.
    pub fn backfilled(self, path: Option<&str>, attribute: Option<&str>) -> Self {
        match self {
            Error::Expectation(error) => Error::Expectation(error.backfilled(path, attribute)),
            other => other,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(error: anyhow::Error) -> Self {
        Error::Unexpected(UnexpectedError::from(error))
    }
}

/// Build the rule error a custom `validate` callback reports for `got`.
pub fn expected(
    expected_type: impl Into<ExpectedType>,
    got: Option<&Value>,
    expected_values: Option<Vec<Value>>,
    custom_message: Option<&str>,
) -> Error {
    let mut error = ExpectationError::processor_validation(expected_type, got.cloned());
    if let Some(values) = expected_values {
        error = error.with_expected_values(values);
    }
    if let Some(message) = custom_message {
        error.set_custom_message(message);
    }
    Error::Expectation(error)
}
