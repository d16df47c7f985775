// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::{json, Number, Value};

use crate::config::{Configuration, Options};
use crate::engine::{Evaluation, Transformer};
use crate::errors::{ExpectationError, Result};
use crate::processors::{attribute_error, check_boolean_option, is_missing};
use crate::schema::Schema;
use crate::traits::{AttributeProcessor, ProcessingMediator};

const CONVERT: &str = "convert";

/// Type names accepted by the `type` keyword.
pub const TYPE_NAMES: [&str; 6] = ["array", "boolean", "integer", "number", "object", "string"];

/// `type`: check the JSON type of a value, optionally converting it.
///
/// A single type name converts strings and booleans into numbers and
/// strings and numbers into booleans when the `convert` option is on. A list
/// of names accepts a value matching any of them and never converts.
pub struct TypeProcessor;

impl AttributeProcessor for TypeProcessor {
    fn declared_options(&self) -> Options {
        Options::new().with(CONVERT, true)
    }

    fn validate_options(&self, configuration: Configuration) -> Result<Configuration> {
        check_boolean_option(&configuration, CONVERT)?;
        Ok(configuration)
    }

    fn validate_attribute_value(&self, value: &Schema) -> Result<Schema> {
        match value {
            Schema::Data(Value::String(name)) if TYPE_NAMES.contains(&name.as_str()) => Ok(value.clone()),
            Schema::Data(Value::String(_)) => Err(attribute_error("string", value)
                .with_expected_values(TYPE_NAMES.iter().map(|name| json!(name)).collect())
                .into()),
            Schema::List(items) if !items.is_empty() && items.iter().all(is_type_name) => Ok(value.clone()),
            Schema::List(_) => Err(attribute_error("an array of type strings", value).into()),
            other => Err(attribute_error("type string", other).into()),
        }
    }

    fn process(
        &self,
        attribute: Option<&Schema>,
        configuration: &Configuration,
        _mediator: &dyn ProcessingMediator,
    ) -> Result<Option<Transformer>> {
        let names: Vec<String> = match attribute {
            Some(Schema::Data(Value::String(name))) => vec![name.clone()],
            Some(Schema::List(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => return Ok(None),
        };
        let convert = names.len() == 1 && configuration.flag(CONVERT);

        Ok(Some(Transformer::on_value(move |value, _| {
            if is_missing(&value) {
                return Evaluation::ready(value);
            }
            let present = value.unwrap_or(Value::Null);
            if names.iter().any(|name| matches_type(name, &present)) {
                return Evaluation::value(present);
            }
            if convert {
                if let Some(converted) = convert_value(&names[0], &present) {
                    return Evaluation::value(converted);
                }
            }
            Evaluation::fail(ExpectationError::processor_validation(names.clone(), Some(present)))
        })))
    }

    fn name(&self) -> &'static str {
        "type"
    }
}

fn is_type_name(schema: &Schema) -> bool {
    schema.as_str().is_some_and(|name| TYPE_NAMES.contains(&name))
}

fn matches_type(name: &str, value: &Value) -> bool {
    match name {
        "array" => value.is_array(),
        "boolean" => value.is_boolean(),
        "integer" => is_integer(value),
        "number" => value.is_number(),
        "object" => value.is_object(),
        "string" => value.is_string(),
        _ => false,
    }
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(number) => {
            number.is_i64() || number.is_u64() || number.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        _ => false,
    }
}

fn convert_value(name: &str, value: &Value) -> Option<Value> {
    match (name, value) {
        ("number", Value::String(text)) => parse_number(text),
        ("integer", Value::String(text)) => parse_number(text).filter(is_integer),
        ("number" | "integer", Value::Bool(flag)) => Some(json!(if *flag { 1 } else { 0 })),
        ("boolean", Value::String(text)) => match text.as_str() {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
        ("boolean", Value::Number(number)) => number.as_f64().map(|n| Value::Bool(n != 0.0)),
        _ => None,
    }
}

/// Integers stay integers; anything else that parses becomes a float.
fn parse_number(text: &str) -> Option<Value> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(integer) = text.parse::<i64>() {
        return Some(Value::from(integer));
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}
