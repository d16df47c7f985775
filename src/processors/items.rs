// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::LIST;
use crate::config::Configuration;
use crate::engine::{Evaluation, Transformer};
use crate::errors::Result;
use crate::processors::{attribute_error, is_missing};
use crate::schema::Schema;
use crate::traits::{AttributeProcessor, ProcessingMediator};

/// `items`: validate every element of an array or every property of an
/// object against one nested schema.
pub struct ItemsProcessor;

impl AttributeProcessor for ItemsProcessor {
    fn validate_attribute_value(&self, value: &Schema) -> Result<Schema> {
        match value {
            Schema::Map(_) | Schema::List(_) => Ok(value.clone()),
            other => Err(attribute_error("schema", other).into()),
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
        let function = mediator.compile(schema, &configuration.with(LIST, true))?;

        Ok(Some(Transformer::on_value(move |value, invocation| {
            if is_missing(&value) {
                Evaluation::ready(value)
            } else {
                function.evaluate(value, invocation)
            }
        })))
    }

    fn name(&self) -> &'static str {
        "items"
    }
}
