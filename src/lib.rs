// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // options, registry, loaders
pub mod engine;     // compiler + runtime evaluation
pub mod errors;     // error taxonomy
pub mod observability;
pub mod processors; // standard keyword processors
pub mod schema;     // raw schema tree
pub mod traits;     // processor and evaluation abstractions

use serde_json::Value;

use crate::config::Options;
use crate::engine::{Compiler, Validation, Validator};
use crate::errors::Result;
use crate::schema::Schema;

/// Compile `schema` with the standard keyword processors.
///
/// ```
/// use serde_json::json;
/// use the_sieve::config::Options;
/// use the_sieve::schema::Schema;
///
/// let schema = Schema::from(json!({"tags": {"items": {"type": "string"}}}));
/// let validator = the_sieve::compile(&schema, &Options::new()).unwrap();
///
/// let error = validator.validate(json!({"tags": ["a", [1]]})).settled().unwrap().unwrap_err();
/// assert_eq!(
///     error.to_string(),
///     "[$.tags.1](type) Expected value to be a string, got an array of value `[1]` instead"
/// );
/// ```
pub fn compile(schema: &Schema, options: &Options) -> Result<Validator> {
    Compiler::standard().compile(schema, options)
}

/// Compile `schema` and validate `value` with it in one go.
///
/// Compilation errors come back as a settled failure.
pub fn validate(value: Value, schema: &Schema, options: &Options) -> Validation {
    match compile(schema, options) {
        Ok(validator) => validator.validate(value),
        Err(error) => Validation::Settled(Err(error)),
    }
}
