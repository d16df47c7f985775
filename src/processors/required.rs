// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::config::{Configuration, Options};
use crate::engine::{Evaluation, Transformer};
use crate::errors::{ExpectationError, Result};
use crate::processors::{attribute_error, check_boolean_option, is_missing};
use crate::schema::Schema;
use crate::traits::{AttributeProcessor, ProcessingMediator};

const REQUIRED: &str = "required";

/// `required`: reject absent and null values.
///
/// Always active so that the `required` option can make every value of a
/// schema mandatory; an explicit `required: false` opts a value out again.
pub struct RequiredProcessor;

impl AttributeProcessor for RequiredProcessor {
    fn always_active(&self) -> bool {
        true
    }

    fn declared_options(&self) -> Options {
        Options::new().with(REQUIRED, false)
    }

    fn validate_options(&self, configuration: Configuration) -> Result<Configuration> {
        check_boolean_option(&configuration, REQUIRED)?;
        Ok(configuration)
    }

    fn validate_attribute_value(&self, value: &Schema) -> Result<Schema> {
        match value.as_bool() {
            Some(_) => Ok(value.clone()),
            None => Err(attribute_error("boolean", value).into()),
        }
    }

    fn process(
        &self,
        attribute: Option<&Schema>,
        configuration: &Configuration,
        _mediator: &dyn ProcessingMediator,
    ) -> Result<Option<Transformer>> {
        let required = match attribute.and_then(Schema::as_bool) {
            Some(required) => required,
            None => configuration.flag(REQUIRED),
        };
        if !required {
            return Ok(None);
        }

        Ok(Some(Transformer::on_value(|value: Option<Value>, _| {
            if is_missing(&value) {
                Evaluation::fail(ExpectationError::processor_validation("defined value", value))
            } else {
                Evaluation::ready(value)
            }
        })))
    }

    fn name(&self) -> &'static str {
        "required"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Compiler;
    use serde_json::json;

    #[test]
    fn test_activation_table_driven() {
        struct TestCase {
            name: &'static str,
            attribute: Option<Schema>,
            option: bool,
            expected_active: bool,
        }

        let test_cases = vec![
            TestCase { name: "absent attribute, option off", attribute: None, option: false, expected_active: false },
            TestCase { name: "absent attribute, option on", attribute: None, option: true, expected_active: true },
            TestCase { name: "true attribute", attribute: Some(Schema::from(true)), option: false, expected_active: true },
            TestCase { name: "false attribute wins over option", attribute: Some(Schema::from(false)), option: true, expected_active: false },
        ];

        let compiler = Compiler::standard();
        for test_case in test_cases {
            let configuration = Configuration::default().with(REQUIRED, test_case.option);
            let transformer = RequiredProcessor
                .process(test_case.attribute.as_ref(), &configuration, &compiler)
                .unwrap();
            assert_eq!(transformer.is_some(), test_case.expected_active, "Test case '{}'", test_case.name);
        }
    }

    #[test]
    fn test_required_messages() {
        let schema = Schema::from(json!({"foo": {"required": true}, "bar": {}}));
        let validator = Compiler::standard().compile(&schema, &Options::new()).unwrap();

        let missing = validator.validate(json!({})).settled().unwrap().unwrap_err();
        assert_eq!(
            missing.to_string(),
            "[$.foo](required) Expected value to be a defined value, got `undefined` instead"
        );

        let null = validator.validate(json!({"foo": null})).settled().unwrap().unwrap_err();
        assert_eq!(
            null.to_string(),
            "[$.foo](required) Expected value to be a defined value, got `null` instead"
        );

        let all_required = Compiler::standard()
            .compile(&schema, &Options::new().with("required", true))
            .unwrap();
        let error = all_required.validate(json!({"foo": 1})).settled().unwrap().unwrap_err();
        assert_eq!(error.as_expectation().and_then(|e| e.path()), Some("$.bar"));
    }

    #[test]
    fn test_required_attribute_must_be_boolean() {
        let error = RequiredProcessor.validate_attribute_value(&Schema::from(json!(1))).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Expected schema attribute to be a boolean, got a number of value `1` instead"
        );
    }
}
