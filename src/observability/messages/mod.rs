// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit the same event with structured fields at its
//! fixed level.
//!
//! # Organization
//!
//! * `compilation` - option resolution and schema compilation events
//! * `validation` - runtime events of a validation call
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_sieve::observability::messages::compilation::SchemaCompiled;
//! use the_sieve::observability::messages::StructuredLog;
//!
//! let msg = SchemaCompiled {
//!     namespace: "$",
//!     mode: "keyed",
//!     entry_count: 3,
//! };
//!
//! msg.log();
//! tracing::debug!("{}", msg);
//! ```

use tracing::Span;

pub mod compilation;
pub mod validation;

/// Emit a message as a structured tracing event or attach it to a span.
pub trait StructuredLog {
    /// Log the message at its level with structured fields.
    fn log(&self);

    /// Create a span carrying the message fields.
    fn span(&self, name: &str) -> Span;
}
