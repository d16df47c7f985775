// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::{json, Value};

use crate::config::{Configuration, Options};
use crate::engine::Transformer;
use crate::errors::Result;
use crate::processors::{attribute_error, check_object_option};
use crate::schema::Schema;
use crate::traits::{AttributeProcessor, ProcessingMediator};

const VALIDATION: &str = "validation";

/// `validate`: run a custom rule callback.
///
/// The callback receives the value and the `validation` option. Rule
/// failures are usually built with [`crate::errors::expected`].
pub struct ValidateProcessor;

impl AttributeProcessor for ValidateProcessor {
    fn declared_options(&self) -> Options {
        Options::new().with(VALIDATION, json!({}))
    }

    fn validate_options(&self, configuration: Configuration) -> Result<Configuration> {
        check_object_option(&configuration, VALIDATION)?;
        Ok(configuration)
    }

    fn validate_attribute_value(&self, value: &Schema) -> Result<Schema> {
        match value {
            Schema::Function(_) => Ok(value.clone()),
            other => Err(attribute_error("function", other).into()),
        }
    }

    fn process(
        &self,
        attribute: Option<&Schema>,
        configuration: &Configuration,
        _mediator: &dyn ProcessingMediator,
    ) -> Result<Option<Transformer>> {
        let Some(callback) = attribute.and_then(Schema::as_function).cloned() else {
            return Ok(None);
        };
        let validation = configuration.get(VALIDATION).cloned().unwrap_or(Value::Null);
        Ok(Some(Transformer::on_value(move |value, _| callback(value, &validation))))
    }

    fn name(&self) -> &'static str {
        "validate"
    }
}
