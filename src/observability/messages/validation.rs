// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for runtime events of a validation call.
//!
//! This module contains message types for logging events related to:
//! * Per-key dispatch inside containers
//! * Errors recorded into an aggregate
//! * Multi-way exhaustion
//! * Call completion

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Validation call started.
///
/// # Log Level
/// `trace!` - Per-call detail
pub struct ValidationStarted<'a> {
    pub namespace: &'a str,
    pub is_async: bool,
    pub full: bool,
}

impl Display for ValidationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Validating '{}' (async={}, full={})",
            self.namespace, self.is_async, self.full
        )
    }
}

impl StructuredLog for ValidationStarted<'_> {
    fn log(&self) {
        tracing::trace!(
            namespace = self.namespace,
            is_async = self.is_async,
            full = self.full,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "validation",
            span_name = name,
            namespace = self.namespace,
            is_async = self.is_async,
            full = self.full,
        )
    }
}

/// Container dispatched one key to its child function.
///
/// # Log Level
/// `trace!` - Per-key detail
///
/// # Example
/// ```
/// use the_sieve::observability::messages::validation::KeyDispatched;
///
/// let msg = KeyDispatched {
///     namespace: "$",
///     key: "name",
///     pending: false,
/// };
///
/// assert_eq!(msg.to_string(), "Validated key 'name' of '$'");
/// ```
pub struct KeyDispatched<'a> {
    pub namespace: &'a str,
    pub key: &'a str,
    pub pending: bool,
}

impl Display for KeyDispatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.pending {
            write!(f, "Key '{}' of '{}' is pending", self.key, self.namespace)
        } else {
            write!(f, "Validated key '{}' of '{}'", self.key, self.namespace)
        }
    }
}

impl StructuredLog for KeyDispatched<'_> {
    fn log(&self) {
        tracing::trace!(
            namespace = self.namespace,
            key = self.key,
            pending = self.pending,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "key_dispatched",
            span_name = name,
            namespace = self.namespace,
            key = self.key,
        )
    }
}

/// Undeclared key dropped from a mutable container.
///
/// # Log Level
/// `trace!` - Per-key detail
pub struct ExtraKeyDropped<'a> {
    pub namespace: &'a str,
    pub key: &'a str,
}

impl Display for ExtraKeyDropped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Dropped undeclared key '{}' of '{}'", self.key, self.namespace)
    }
}

impl StructuredLog for ExtraKeyDropped<'_> {
    fn log(&self) {
        tracing::trace!(namespace = self.namespace, key = self.key, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "extra_key_dropped",
            span_name = name,
            namespace = self.namespace,
            key = self.key,
        )
    }
}

/// Runtime error recorded into the call's aggregate.
///
/// # Log Level
/// `trace!` - Per-key detail
pub struct ErrorRecorded<'a> {
    pub path: &'a str,
    pub message: &'a str,
}

impl Display for ErrorRecorded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Recorded error at '{}': {}", self.path, self.message)
    }
}

impl StructuredLog for ErrorRecorded<'_> {
    fn log(&self) {
        tracing::trace!(path = self.path, message = self.message, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!("error_recorded", span_name = name, path = self.path)
    }
}

/// Every way of a multi-way schema rejected the value.
///
/// # Log Level
/// `debug!` - Validation outcome
///
/// # Example
/// ```
/// use the_sieve::observability::messages::validation::WaysExhausted;
///
/// let msg = WaysExhausted {
///     namespace: "$.id",
///     way_count: 2,
/// };
///
/// assert_eq!(msg.to_string(), "All 2 ways rejected the value at '$.id'");
/// ```
pub struct WaysExhausted<'a> {
    pub namespace: &'a str,
    pub way_count: usize,
}

impl Display for WaysExhausted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "All {} ways rejected the value at '{}'",
            self.way_count, self.namespace
        )
    }
}

impl StructuredLog for WaysExhausted<'_> {
    fn log(&self) {
        tracing::debug!(
            namespace = self.namespace,
            way_count = self.way_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "ways_exhausted",
            span_name = name,
            namespace = self.namespace,
            way_count = self.way_count,
        )
    }
}

/// Aggregate of recorded errors raised at the end of a call.
///
/// # Log Level
/// `debug!` - Validation outcome
pub struct AggregateRaised<'a> {
    pub namespace: &'a str,
    pub error_count: usize,
}

impl Display for AggregateRaised<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Validation of '{}' collected {} errors",
            self.namespace, self.error_count
        )
    }
}

impl StructuredLog for AggregateRaised<'_> {
    fn log(&self) {
        tracing::debug!(
            namespace = self.namespace,
            error_count = self.error_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "aggregate_raised",
            span_name = name,
            namespace = self.namespace,
            error_count = self.error_count,
        )
    }
}
