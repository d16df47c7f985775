// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use thiserror::Error;

use super::ExpectationError;

/// Aggregate of every runtime failure recorded during one validation call.
///
/// Entries are keyed by path; recording a second error at the same path
/// replaces the first. Iteration order is path order, so the reported set
/// never depends on the order in which pending checks settled.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("Errors occurred during validation")]
pub struct FullValidationError {
    errors: BTreeMap<String, ExpectationError>,
}

impl FullValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `error` under `path`, overwriting any earlier entry.
    pub fn set_path_error(&mut self, path: impl Into<String>, error: ExpectationError) {
        self.errors.insert(path.into(), error);
    }

    pub fn path_errors(&self) -> &BTreeMap<String, ExpectationError> {
        &self.errors
    }

    pub fn errors(&self) -> Vec<&ExpectationError> {
        self.errors.values().collect()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.errors.keys().map(String::as_str).collect()
    }

    /// Custom message when set, derived message otherwise, per path.
    pub fn path_error_messages(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|(path, error)| (path.clone(), error.display_message()))
            .collect()
    }

    /// Sorted list of the messages of every recorded error.
    pub fn error_messages(&self) -> Vec<String> {
        let mut messages: Vec<String> = self
            .errors
            .values()
            .map(ExpectationError::display_message)
            .collect();
        messages.sort();
        messages
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
