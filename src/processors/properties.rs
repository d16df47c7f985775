// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::LIST;
use crate::config::Configuration;
use crate::engine::{Evaluation, Transformer};
use crate::errors::Result;
use crate::processors::{attribute_error, is_missing};
use crate::schema::Schema;
use crate::traits::{AttributeProcessor, ProcessingMediator};

/// `properties`: validate a nested object against a keyed schema.
pub struct PropertiesProcessor;

impl AttributeProcessor for PropertiesProcessor {
    fn validate_attribute_value(&self, value: &Schema) -> Result<Schema> {
        if value.is_map() {
            Ok(value.clone())
        } else {
            Err(attribute_error("schema", value).into())
        }
    }

    fn process(
        &self,
        attribute: Option<&Schema>,
        configuration: &Configuration,
        mediator: &dyn ProcessingMediator,
    ) -> Result<Option<Transformer>> {
        let Some(schema) = attribute else {
            return Ok(None);
        };
        let function = mediator.compile(schema, &configuration.with(LIST, false))?;

        Ok(Some(Transformer::on_value(move |value, invocation| {
            if is_missing(&value) {
                Evaluation::ready(value)
            } else {
                function.evaluate(value, invocation)
            }
        })))
    }

    fn name(&self) -> &'static str {
        "properties"
    }
}
