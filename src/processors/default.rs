// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Configuration;
use crate::engine::{Evaluation, Transformer};
use crate::errors::Result;
use crate::processors::{attribute_error, is_missing};
use crate::schema::Schema;
use crate::traits::{AttributeProcessor, ProcessingMediator};

/// `default`: substitute a value for an absent or null one.
pub struct DefaultProcessor;

impl AttributeProcessor for DefaultProcessor {
    fn validate_attribute_value(&self, value: &Schema) -> Result<Schema> {
        match value {
            Schema::Function(_) => Err(attribute_error("JSON value", value).into()),
            data => Ok(Schema::Data(data.to_value())),
        }
    }

    fn process(
        &self,
        attribute: Option<&Schema>,
        _configuration: &Configuration,
        _mediator: &dyn ProcessingMediator,
    ) -> Result<Option<Transformer>> {
        let Some(default) = attribute.map(Schema::to_value) else {
            return Ok(None);
        };
        Ok(Some(Transformer::on_value(move |value, _| {
            if is_missing(&value) {
                Evaluation::value(default.clone())
            } else {
                Evaluation::ready(value)
            }
        })))
    }

    fn name(&self) -> &'static str {
        "default"
    }
}
