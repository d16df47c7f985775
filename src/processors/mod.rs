// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Standard keyword processors.
//!
//! Registered by [`crate::config::ProcessorRegistry::standard`] in this order:
//! `format`, `default`, `required`, `type`, `items`, `properties`, `validate`,
//! `error`.

mod default;
mod error;
mod format;
mod items;
mod kind;
mod properties;
mod required;
mod validate;

#[cfg(test)]
pub mod stub;

pub use default::DefaultProcessor;
pub use error::ErrorProcessor;
pub use format::FormatProcessor;
pub use items::ItemsProcessor;
pub use kind::TypeProcessor;
pub use properties::PropertiesProcessor;
pub use required::RequiredProcessor;
pub use validate::ValidateProcessor;

use serde_json::Value;

use crate::config::Configuration;
use crate::errors::{ExpectationError, Result};
use crate::schema::Schema;

/// Absent and null values are treated alike by most processors.
pub(crate) fn is_missing(value: &Option<Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Error for an attribute value a processor cannot accept.
pub(crate) fn attribute_error(expected: &str, value: &Schema) -> ExpectationError {
    ExpectationError::processor_compilation("schema attribute", expected, Some(value.to_value()))
}

pub(crate) fn check_boolean_option(configuration: &Configuration, name: &str) -> Result<()> {
    match configuration.get(name) {
        Some(Value::Bool(_)) => Ok(()),
        other => Err(ExpectationError::processor_compilation(
            format!("'{}' option", name),
            "boolean",
            other.cloned(),
        )
        .into()),
    }
}

pub(crate) fn check_object_option(configuration: &Configuration, name: &str) -> Result<()> {
    match configuration.get(name) {
        Some(Value::Object(_)) => Ok(()),
        other => Err(ExpectationError::processor_compilation(
            format!("'{}' option", name),
            "object",
            other.cloned(),
        )
        .into()),
    }
}
