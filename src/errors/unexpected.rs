// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Any non-taxonomy failure escaping processor code, wrapped at the engine
/// boundary so callers only ever see taxonomy errors.
#[derive(Debug, Error)]
#[error("Unexpected error ({inner})")]
pub struct UnexpectedError {
    #[source]
    inner: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl UnexpectedError {
    pub fn new(inner: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self {
            inner: inner.into(),
        }
    }

    /// The wrapped error.
    pub fn error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.inner.as_ref()
    }
}

impl From<anyhow::Error> for UnexpectedError {
    fn from(error: anyhow::Error) -> Self {
        Self::new(error)
    }
}
