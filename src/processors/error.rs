// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Configuration;
use crate::engine::{Evaluation, Transformer};
use crate::errors::Result;
use crate::processors::attribute_error;
use crate::schema::Schema;
use crate::traits::{AttributeProcessor, ProcessingMediator};

/// `error`: attach a custom message to any expectation error raised earlier
/// in the plan. A message set by an inner schema is kept.
pub struct ErrorProcessor;

impl AttributeProcessor for ErrorProcessor {
    fn is_catcher(&self) -> bool {
        true
    }

    fn validate_attribute_value(&self, value: &Schema) -> Result<Schema> {
        match value.as_str() {
            Some(_) => Ok(value.clone()),
            None => Err(attribute_error("string", value).into()),
        }
    }

    fn process(
        &self,
        attribute: Option<&Schema>,
        _configuration: &Configuration,
        _mediator: &dyn ProcessingMediator,
    ) -> Result<Option<Transformer>> {
        let Some(message) = attribute.and_then(Schema::as_str).map(str::to_string) else {
            return Ok(None);
        };
        Ok(Some(Transformer::on_error(move |mut error, _| {
            if error.custom_message().is_none() {
                error.set_custom_message(message.clone());
            }
            Evaluation::fail(error)
        })))
    }

    fn name(&self) -> &'static str {
        "error"
    }
}
