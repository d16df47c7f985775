// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::{json, Value};

use crate::config::Options;
use crate::engine::{Compiler, Evaluation, Invocation};
use crate::errors::{expected, ExpectationKind};
use crate::processors::stub;
use crate::schema::Schema;

/// End-to-end tests driving compiled validators through the public surface
#[cfg(test)]
mod tests {
    use super::*;

    fn stub_compiler() -> Compiler {
        Compiler::new(stub::registry())
    }

    #[tokio::test]
    async fn test_async_option_always_pending() {
        let schema = Schema::from(json!({"count": {"type": "number"}}));
        let options = Options::new().with("async", true);
        let validator = Compiler::standard().compile(&schema, &options).unwrap();

        let accepted = validator.validate(json!({"count": "3"}));
        assert!(accepted.is_pending());
        assert_eq!(accepted.await.unwrap(), json!({"count": 3}));

        let rejected = validator.validate(json!({"count": "three"}));
        assert!(rejected.is_pending());
        assert_eq!(
            rejected.await.unwrap_err().to_string(),
            "[$.count](type) Expected value to be a number, got a string of value `\"three\"` instead"
        );
    }

    #[tokio::test]
    async fn test_pending_step_then_catcher_recovers() {
        let schema = Schema::from(json!({
            "status": {"delay": 5, "reject": "approved status", "recover": "pending"}
        }));
        let validator = stub_compiler().compile(&schema, &Options::new()).unwrap();

        let validation = validator.validate(json!({"status": "draft"}));
        assert!(validation.is_pending());
        assert_eq!(validation.await.unwrap(), json!({"status": "pending"}));
    }

    #[tokio::test]
    async fn test_pending_step_then_error_message() {
        let schema = Schema::from(json!({
            "status": {"delay": 5, "reject": "approved status", "error": "status must be approved"}
        }));
        let validator = stub_compiler().compile(&schema, &Options::new()).unwrap();

        let error = validator.validate(json!({"status": "draft"})).await.unwrap_err();
        let expectation = error.as_expectation().unwrap();
        assert_eq!(expectation.kind(), ExpectationKind::ProcessorValidation);
        assert_eq!(expectation.path(), Some("$.status"));
        assert_eq!(expectation.attribute(), Some("reject"));
        assert_eq!(expectation.display_message(), "status must be approved");
    }

    #[tokio::test]
    async fn test_multi_way_with_pending_ways() {
        let schema = Schema::from(json!({
            "id": [
                {"delay": 5, "type": "integer"},
                {"delay": 1, "type": "string", "reject": "uuid"},
                {"type": "string"}
            ]
        }));
        let options = Options::new().with("convert", false);
        let validator = stub_compiler().compile(&schema, &options).unwrap();

        assert_eq!(validator.validate(json!({"id": 7})).await.unwrap(), json!({"id": 7}));
        assert_eq!(
            validator.validate(json!({"id": "abc"})).await.unwrap(),
            json!({"id": "abc"})
        );

        let error = validator.validate(json!({"id": true})).await.unwrap_err();
        let expectation = error.as_expectation().unwrap();
        assert_eq!(expectation.kind(), ExpectationKind::Validation);
        assert_eq!(expectation.path(), Some("$.id"));
        assert_eq!(expectation.expected_type().names(), ["value validated by a schema"]);
        assert_eq!(expectation.expected_values().map(<[Value]>::len), Some(3));
    }

    #[tokio::test]
    async fn test_full_mode_collects_custom_messages_across_pending_children() {
        let schema = Schema::from(json!({
            "name": {"type": "string", "required": true, "error": "name is required"},
            "slow": {"delay": 5, "type": "integer"},
            "tags": {"items": {"type": "string"}}
        }));
        let options = Options::new().with("full", true);
        let validator = stub_compiler().compile(&schema, &options).unwrap();

        let error = validator
            .validate(json!({"slow": "x", "tags": ["a", {}]}))
            .await
            .unwrap_err();
        let aggregate = error.as_full().expect("aggregate error");

        let messages = aggregate.path_error_messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages["$.name"], "name is required");
        assert_eq!(
            messages["$.slow"],
            "[$.slow](type) Expected value to be an integer, got a string of value `\"x\"` instead"
        );
        assert_eq!(
            messages["$.tags.1"],
            "[$.tags.1](type) Expected value to be a string, got an object of value `{}` instead"
        );
    }

    #[test]
    fn test_unexpected_runtime_error_is_not_aggregated() {
        let schema = Schema::from(json!({"a": {"type": "string"}, "b": {"explode": true}}));
        let options = Options::new().with("full", true);
        let validator = stub_compiler().compile(&schema, &options).unwrap();

        let error = validator.validate(json!({"a": 1, "b": 2})).settled().unwrap().unwrap_err();
        assert!(error.as_unexpected().is_some());
        assert_eq!(error.to_string(), "Unexpected error (boom)");
    }

    #[test]
    fn test_extra_keys_by_mode() {
        struct TestCase {
            name: &'static str,
            options: Options,
            expected: std::result::Result<Value, &'static str>,
        }

        let schema = Schema::from(json!({"keep": {"type": "string"}}));
        let test_cases = vec![
            TestCase {
                name: "immutable fails fast",
                options: Options::new(),
                expected: Err("[$] Expected value to be an object with properties in [\"keep\"], got an object of value `{\"keep\":\"k\",\"extra\":1}` instead"),
            },
            TestCase {
                name: "mutable drops silently",
                options: Options::new().with("immutable", false),
                expected: Ok(json!({"keep": "k"})),
            },
            TestCase {
                name: "full records extra",
                options: Options::new().with("full", true),
                expected: Err("Errors occurred during validation"),
            },
        ];

        for test_case in test_cases {
            let validator = Compiler::standard().compile(&schema, &test_case.options).unwrap();
            let result = validator
                .validate(json!({"keep": "k", "extra": 1}))
                .settled()
                .unwrap()
                .map_err(|error| error.to_string());
            assert_eq!(
                result,
                test_case.expected.map_err(str::to_string),
                "Test case '{}'",
                test_case.name
            );
        }
    }

    #[test]
    fn test_custom_namespace_and_nested_collections() {
        let schema = Schema::from(json!({"matrix": {"items": {"items": {"type": "number"}}}}));
        let options = Options::new().with("namespace", "grid");
        let validator = Compiler::standard().compile(&schema, &options).unwrap();

        assert_eq!(validator.namespace(), "grid");
        let error = validator
            .validate(json!({"matrix": [[1, 2], [3, "x"]]}))
            .settled()
            .unwrap()
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "[grid.matrix.1.1](type) Expected value to be a number, got a string of value `\"x\"` instead"
        );
    }

    #[test]
    fn test_bare_function_from_process() {
        let schema = Schema::map([(
            "even",
            Schema::map([(
                "validate",
                Schema::function(|value, _| match value.as_ref().and_then(Value::as_i64) {
                    Some(number) if number % 2 != 0 => {
                        Evaluation::fail(expected("even number", value.as_ref(), None, None))
                    }
                    _ => Evaluation::ready(value),
                }),
            )]),
        )]);
        let function = Compiler::standard().process(&schema, &Options::new()).unwrap();

        match function.evaluate(Some(json!({"even": 4})), &Invocation::new()) {
            Evaluation::Settled(Ok(value)) => assert_eq!(value, Some(json!({"even": 4}))),
            other => panic!("unexpected evaluation {:?}", other),
        }

        let invocation = Invocation::aggregating();
        match function.evaluate(Some(json!({"even": 3})), &invocation) {
            Evaluation::Settled(Ok(_)) => {}
            other => panic!("unexpected evaluation {:?}", other),
        }
        let aggregate = invocation.aggregate().expect("recorded error");
        assert_eq!(aggregate.paths(), vec!["$.even"]);
    }

    #[test]
    fn test_root_collection_mode() {
        struct TestCase {
            name: &'static str,
            input: Value,
            expected: std::result::Result<Value, &'static str>,
        }

        let schema = Schema::from(json!({
            "type": "object",
            "properties": {"foo": {"type": "number", "default": 3}}
        }));
        let validator = Compiler::standard()
            .compile(&schema, &Options::new().with("list", true))
            .unwrap();

        let test_cases = vec![
            TestCase {
                name: "elements validated and defaulted",
                input: json!([{"foo": 1}, {"foo": 4}, {}]),
                expected: Ok(json!([{"foo": 1}, {"foo": 4}, {"foo": 3}])),
            },
            TestCase {
                name: "empty collection",
                input: json!([]),
                expected: Ok(json!([])),
            },
            TestCase {
                name: "nested property path",
                input: json!([{"foo": 1}, {"foo": "x"}]),
                expected: Err("[$.1.foo](type) Expected value to be a number, got a string of value `\"x\"` instead"),
            },
            TestCase {
                name: "element is not an object",
                input: json!([5]),
                expected: Err("[$.0](type) Expected value to be an object, got a number of value `5` instead"),
            },
        ];

        for test_case in test_cases {
            let result = validator
                .validate(test_case.input)
                .settled()
                .unwrap()
                .map_err(|error| error.to_string());
            assert_eq!(
                result,
                test_case.expected.map_err(str::to_string),
                "Test case '{}'",
                test_case.name
            );
        }
    }

    #[test]
    fn test_validating_a_validated_value_is_stable() {
        struct TestCase {
            name: &'static str,
            schema: Value,
            options: Options,
            input: Value,
        }

        let test_cases = vec![
            TestCase {
                name: "conversions and defaults",
                schema: json!({
                    "name": {"type": "string", "required": true},
                    "age": {"type": "integer", "default": 0},
                    "active": {"type": "boolean"}
                }),
                options: Options::new(),
                input: json!({"name": "Ada", "active": "1"}),
            },
            TestCase {
                name: "root collection",
                schema: json!({"type": "object", "properties": {"foo": {"type": "number", "default": 3}}}),
                options: Options::new().with("list", true),
                input: json!([{"foo": "1"}, {}]),
            },
            TestCase {
                name: "mutable with dropped extras",
                schema: json!({"tags": {"items": {"type": "string"}}, "count": {"type": "number"}}),
                options: Options::new().with("immutable", false),
                input: json!({"tags": ["a"], "count": "2", "extra": true}),
            },
            TestCase {
                name: "alternatives",
                schema: json!({"id": [{"type": "integer"}, {"type": "string"}]}),
                options: Options::new().with("full", true),
                input: json!({"id": "7"}),
            },
        ];

        for test_case in test_cases {
            let validator = Compiler::standard()
                .compile(&Schema::from(test_case.schema), &test_case.options)
                .unwrap();

            let first = validator.validate(test_case.input).settled().unwrap().unwrap();
            let second = validator.validate(first.clone()).settled().unwrap().unwrap();
            assert_eq!(second, first, "Test case '{}'", test_case.name);
        }
    }

    #[tokio::test]
    async fn test_failed_way_records_do_not_leak_into_aggregate() {
        struct TestCase {
            name: &'static str,
            schema: Value,
            expected: std::result::Result<Value, Vec<&'static str>>,
        }

        let test_cases = vec![
            TestCase {
                name: "later way accepts",
                schema: json!({"foo": [{"properties": {"a": {"type": "string"}}}, {"type": "object"}]}),
                expected: Ok(json!({"foo": {"a": 1}})),
            },
            TestCase {
                name: "later way accepts after pending way",
                schema: json!({"foo": [{"delay": 1, "properties": {"a": {"type": "string"}}}, {"type": "object"}]}),
                expected: Ok(json!({"foo": {"a": 1}})),
            },
            TestCase {
                name: "every way fails",
                schema: json!({"foo": [{"properties": {"a": {"type": "string"}}}, {"type": "array"}]}),
                expected: Err(vec!["$.foo"]),
            },
        ];

        for test_case in test_cases {
            let schema = Schema::from(test_case.schema);
            for options in [Options::new(), Options::new().with("full", true)] {
                let full = options.get("full").is_some();
                let validator = stub_compiler().compile(&schema, &options).unwrap();
                let result = validator.validate(json!({"foo": {"a": 1}})).await;

                match (&test_case.expected, result) {
                    (Ok(expected), Ok(value)) => {
                        assert_eq!(&value, expected, "Test case '{}' (full: {})", test_case.name, full)
                    }
                    (Err(paths), Err(error)) if full => {
                        let aggregate = error.as_full().expect("aggregate error");
                        assert_eq!(&aggregate.paths(), paths, "Test case '{}'", test_case.name);
                    }
                    (Err(_), Err(error)) => {
                        assert_eq!(
                            error.as_expectation().and_then(|e| e.path()),
                            Some("$.foo"),
                            "Test case '{}'",
                            test_case.name
                        );
                    }
                    (expected, actual) => panic!(
                        "Test case '{}' (full: {}): expected {:?}, got {:?}",
                        test_case.name, full, expected, actual
                    ),
                }
            }
        }
    }
}
