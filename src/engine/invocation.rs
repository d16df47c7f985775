// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::{Arc, Mutex, PoisonError};

use crate::errors::{ExpectationError, FullValidationError};

/// Context of one validation call, threaded through every validation function.
///
/// Clones share the same aggregator, so continuations that run after a pending
/// step still record into the call that started them.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    aggregator: Option<Arc<Mutex<FullValidationError>>>,
}

impl Invocation {
    /// Fail-fast call context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call context that collects runtime errors instead of failing fast.
    pub fn aggregating() -> Self {
        Self {
            aggregator: Some(Arc::new(Mutex::new(FullValidationError::new()))),
        }
    }

    pub fn is_aggregating(&self) -> bool {
        self.aggregator.is_some()
    }

    /// Record `error` at `path`. Returns `false` when this call is not aggregating.
    pub fn record(&self, path: &str, error: ExpectationError) -> bool {
        match &self.aggregator {
            Some(aggregator) => {
                aggregator
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .set_path_error(path, error);
                true
            }
            None => false,
        }
    }

    /// Context for a tentative branch: aggregates into a fresh, private
    /// aggregator when this call aggregates, fails fast otherwise.
    pub fn fork(&self) -> Self {
        if self.is_aggregating() {
            Self::aggregating()
        } else {
            Self::new()
        }
    }

    /// The collected errors, when at least one was recorded.
    pub fn aggregate(&self) -> Option<FullValidationError> {
        let aggregator = self.aggregator.as_ref()?;
        let full = aggregator.lock().unwrap_or_else(PoisonError::into_inner);
        if full.is_empty() {
            None
        } else {
            Some(full.clone())
        }
    }
}
