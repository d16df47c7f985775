// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for option resolution and schema compilation.
//!
//! This module contains message types for logging events related to:
//! * Option resolution and rejected option names
//! * Container and processing plan construction
//! * Compilation failures

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Options resolved into a configuration.
///
/// # Log Level
/// `debug!` - Compilation detail
///
/// # Example
/// ```
/// use the_sieve::observability::messages::compilation::OptionsResolved;
///
/// let msg = OptionsResolved {
///     namespace: "$",
///     option_count: 9,
///     is_async: false,
///     full: true,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct OptionsResolved<'a> {
    pub namespace: &'a str,
    pub option_count: usize,
    pub is_async: bool,
    pub full: bool,
}

impl Display for OptionsResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Resolved {} options for '{}' (async={}, full={})",
            self.option_count, self.namespace, self.is_async, self.full
        )
    }
}

impl StructuredLog for OptionsResolved<'_> {
    fn log(&self) {
        tracing::debug!(
            namespace = self.namespace,
            option_count = self.option_count,
            is_async = self.is_async,
            full = self.full,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "options_resolved",
            span_name = name,
            namespace = self.namespace,
            option_count = self.option_count,
        )
    }
}

/// Caller passed an option name nothing handles.
///
/// # Log Level
/// `debug!` - The caller receives the compilation error
pub struct UnknownOption<'a> {
    pub name: &'a str,
    pub namespace: &'a str,
}

impl Display for UnknownOption<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Unknown option '{}' at '{}'", self.name, self.namespace)
    }
}

impl StructuredLog for UnknownOption<'_> {
    fn log(&self) {
        tracing::debug!(name = self.name, namespace = self.namespace, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "unknown_option",
            span_name = name,
            option = self.name,
            namespace = self.namespace,
        )
    }
}

/// Container schema compiled.
///
/// # Log Level
/// `debug!` - Compilation detail
///
/// # Example
/// ```
/// use the_sieve::observability::messages::compilation::SchemaCompiled;
///
/// let msg = SchemaCompiled {
///     namespace: "$.items",
///     mode: "collection",
///     entry_count: 1,
/// };
///
/// assert_eq!(msg.to_string(), "Compiled collection schema at '$.items' with 1 entries");
/// ```
pub struct SchemaCompiled<'a> {
    pub namespace: &'a str,
    pub mode: &'a str,
    pub entry_count: usize,
}

impl Display for SchemaCompiled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Compiled {} schema at '{}' with {} entries",
            self.mode, self.namespace, self.entry_count
        )
    }
}

impl StructuredLog for SchemaCompiled<'_> {
    fn log(&self) {
        tracing::debug!(
            namespace = self.namespace,
            mode = self.mode,
            entry_count = self.entry_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "schema_compiled",
            span_name = name,
            namespace = self.namespace,
            mode = self.mode,
            entry_count = self.entry_count,
        )
    }
}

/// Processing plan built for one single-way schema.
///
/// # Log Level
/// `debug!` - Compilation detail
pub struct PlanBuilt<'a> {
    pub namespace: &'a str,
    pub steps: &'a [&'a str],
}

impl Display for PlanBuilt<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.steps.is_empty() {
            write!(f, "Built empty processing plan at '{}'", self.namespace)
        } else {
            write!(
                f,
                "Built processing plan at '{}': {}",
                self.namespace,
                self.steps.join(" -> ")
            )
        }
    }
}

impl StructuredLog for PlanBuilt<'_> {
    fn log(&self) {
        tracing::debug!(
            namespace = self.namespace,
            steps = self.steps.join(","),
            step_count = self.steps.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "plan_built",
            span_name = name,
            namespace = self.namespace,
            step_count = self.steps.len(),
        )
    }
}

/// Compilation rejected a schema or an attribute.
///
/// # Log Level
/// `debug!` - The caller receives the error
///
/// # Example
/// ```
/// use the_sieve::observability::messages::compilation::CompilationFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "bad attribute");
/// let msg = CompilationFailed {
///     namespace: "$.foo",
///     error: &error,
/// };
///
/// assert_eq!(msg.to_string(), "Compilation failed at '$.foo': bad attribute");
/// ```
pub struct CompilationFailed<'a> {
    pub namespace: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for CompilationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Compilation failed at '{}': {}", self.namespace, self.error)
    }
}

impl StructuredLog for CompilationFailed<'_> {
    fn log(&self) {
        tracing::debug!(
            namespace = self.namespace,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "compilation_failed",
            span_name = name,
            namespace = self.namespace,
            error = %self.error,
        )
    }
}
