// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Processors for exercising the engine in tests.

use std::time::Duration;

use serde_json::Value;

use crate::config::{Configuration, ProcessorRegistry};
use crate::engine::{Evaluation, Transformer};
use crate::errors::{Error, ExpectationError, Result};
use crate::schema::Schema;
use crate::traits::{AttributeProcessor, ProcessingMediator};

/// `delay: <millis>`: suspends, then passes the value on unchanged.
pub struct DelayProcessor;

impl AttributeProcessor for DelayProcessor {
    fn validate_attribute_value(&self, value: &Schema) -> Result<Schema> {
        match value.as_data().and_then(Value::as_u64) {
            Some(_) => Ok(value.clone()),
            None => Err(ExpectationError::processor_compilation(
                "schema attribute",
                "number",
                Some(value.to_value()),
            )
            .into()),
        }
    }

    fn process(
        &self,
        attribute: Option<&Schema>,
        _configuration: &Configuration,
        _mediator: &dyn ProcessingMediator,
    ) -> Result<Option<Transformer>> {
        let millis = attribute
            .and_then(Schema::as_data)
            .and_then(Value::as_u64)
            .unwrap_or(0);
        Ok(Some(Transformer::on_value(move |value, _| {
            Evaluation::pending(async move {
                tokio::time::sleep(Duration::from_millis(millis)).await;
                Ok(value)
            })
        })))
    }

    fn name(&self) -> &'static str {
        "delay"
    }
}

/// `recover: <value>`: replaces any expectation error with a fixed value.
pub struct RecoverProcessor;

impl AttributeProcessor for RecoverProcessor {
    fn is_catcher(&self) -> bool {
        true
    }

    fn validate_attribute_value(&self, value: &Schema) -> Result<Schema> {
        Ok(Schema::Data(value.to_value()))
    }

    fn process(
        &self,
        attribute: Option<&Schema>,
        _configuration: &Configuration,
        _mediator: &dyn ProcessingMediator,
    ) -> Result<Option<Transformer>> {
        let replacement = attribute.map(Schema::to_value).unwrap_or(Value::Null);
        Ok(Some(Transformer::on_error(move |_, _| {
            Evaluation::value(replacement.clone())
        })))
    }

    fn name(&self) -> &'static str {
        "recover"
    }
}

/// `reject: <label>`: always fails with a rule error.
pub struct RejectProcessor;

impl AttributeProcessor for RejectProcessor {
    fn validate_attribute_value(&self, value: &Schema) -> Result<Schema> {
        Ok(value.clone())
    }

    fn process(
        &self,
        attribute: Option<&Schema>,
        _configuration: &Configuration,
        _mediator: &dyn ProcessingMediator,
    ) -> Result<Option<Transformer>> {
        let label = attribute.and_then(Schema::as_str).unwrap_or("nothing").to_string();
        Ok(Some(Transformer::on_value(move |value, _| {
            Evaluation::fail(ExpectationError::processor_validation(label.as_str(), value))
        })))
    }

    fn name(&self) -> &'static str {
        "reject"
    }
}

/// `explode: true`: fails at run time with a foreign error.
pub struct ExplodeProcessor;

impl AttributeProcessor for ExplodeProcessor {
    fn validate_attribute_value(&self, value: &Schema) -> Result<Schema> {
        Ok(value.clone())
    }

    fn process(
        &self,
        _attribute: Option<&Schema>,
        _configuration: &Configuration,
        _mediator: &dyn ProcessingMediator,
    ) -> Result<Option<Transformer>> {
        Ok(Some(Transformer::on_value(|_, _| {
            Evaluation::fail(Error::unexpected("boom"))
        })))
    }

    fn name(&self) -> &'static str {
        "explode"
    }
}

/// The standard registry extended with every stub.
pub fn registry() -> ProcessorRegistry {
    let mut registry = ProcessorRegistry::standard();
    registry
        .register("delay", std::sync::Arc::new(DelayProcessor))
        .register("recover", std::sync::Arc::new(RecoverProcessor))
        .register("reject", std::sync::Arc::new(RejectProcessor))
        .register("explode", std::sync::Arc::new(ExplodeProcessor));
    registry
}
