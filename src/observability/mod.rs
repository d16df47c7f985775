// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Diagnostic logging for the compiler and the validation engine.
//!
//! Every event is a small struct in [`messages`] that renders its line through
//! `Display` and emits structured fields through
//! [`messages::StructuredLog`]. Log wording lives here, next to the fields,
//! rather than at the call sites.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::compilation` - option resolution and schema compilation
//! * `messages::validation` - runtime events of a validation call
//!
//! # Usage
//!
//! ```rust
//! use the_sieve::observability::messages::validation::WaysExhausted;
//! use the_sieve::observability::messages::StructuredLog;
//!
//! WaysExhausted {
//!     namespace: "$.id",
//!     way_count: 2,
//! }
//! .log();
//! ```

pub mod messages;
