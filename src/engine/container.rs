// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Container-level validation: keyed objects and homogeneous collections.
//!
//! A container dispatches every key of its working set to a child validation
//! function in a fixed order: declared properties then undeclared input keys in
//! keyed mode, input order in collection mode. Synchronous children settle in
//! place; pending children are collected and joined once every key has been
//! dispatched. The first failure in dispatch order wins regardless of when the
//! pending children settle.

use futures_util::future::{join_all, BoxFuture};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::engine::{Evaluation, Invocation, Outcome};
use crate::errors::{Error, ExpectationError};
use crate::observability::messages::validation::{ErrorRecorded, ExtraKeyDropped, KeyDispatched};
use crate::observability::messages::StructuredLog;
use crate::traits::{Evaluate, ValidationFunction};

/// How a container maps its keys to child functions.
#[derive(Clone)]
pub enum Layout {
    /// Declared properties, each with its own child function.
    Keyed(Vec<(String, ValidationFunction)>),
    /// One element function applied to every entry of an array or object.
    Collection(ValidationFunction),
}

#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    namespace: String,
    layout: Layout,
    immutable: bool,
}

/// Result of one dispatched key.
enum Slot {
    Value(Value),
    /// The child resolved to nothing; the key is left out.
    Removed,
    /// The child failed and its error went to the aggregate.
    Recorded,
    Pending(BoxFuture<'static, Outcome>),
}

impl Container {
    pub fn new(namespace: &str, layout: Layout, immutable: bool) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                namespace: namespace.to_string(),
                layout,
                immutable,
            }),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.inner.namespace
    }

    pub fn is_collection(&self) -> bool {
        matches!(self.inner.layout, Layout::Collection(_))
    }
}

impl Evaluate for Container {
    fn evaluate(&self, value: Option<Value>, invocation: &Invocation) -> Evaluation {
        let inner = &self.inner;
        let input = match value {
            Some(Value::Object(map)) => Value::Object(map),
            Some(Value::Array(items)) if self.is_collection() => Value::Array(items),
            other => {
                let expected: &[&str] = if self.is_collection() {
                    &["array", "object"]
                } else {
                    &["object"]
                };
                return Evaluation::fail(ExpectationError::validation(
                    inner.namespace.as_str(),
                    expected,
                    other,
                ));
            }
        };

        let mut slots: Vec<(String, Slot)> = Vec::new();
        let mut failure: Option<Error> = None;

        for (key, child_input, function) in inner.work_set(&input) {
            let slot = match function {
                Some(function) => match function.evaluate(child_input, invocation) {
                    Evaluation::Settled(outcome) => inner.settle(&key, outcome, invocation),
                    Evaluation::Pending(future) => Ok(Slot::Pending(future)),
                },
                None => inner.reject_extra(&key, &input, invocation),
            };

            KeyDispatched {
                namespace: &inner.namespace,
                key: &key,
                pending: matches!(slot, Ok(Slot::Pending(_))),
            }
            .log();

            match slot {
                Ok(slot) => slots.push((key, slot)),
                Err(error) => {
                    failure = Some(error);
                    break;
                }
            }
        }

        if !slots.iter().any(|(_, slot)| matches!(slot, Slot::Pending(_))) {
            return match failure {
                Some(error) => Evaluation::fail(error),
                None => Evaluation::value(inner.materialize(input, slots)),
            };
        }

        let inner = self.inner.clone();
        let invocation = invocation.clone();
        Evaluation::pending(async move {
            let mut keys = Vec::with_capacity(slots.len());
            let mut futures = Vec::new();
            let mut settled: Vec<Option<Slot>> = Vec::with_capacity(slots.len());
            for (key, slot) in slots {
                match slot {
                    Slot::Pending(future) => {
                        futures.push(future);
                        settled.push(None);
                    }
                    other => settled.push(Some(other)),
                }
                keys.push(key);
            }

            let mut outcomes = join_all(futures).await.into_iter();
            let mut first_failure: Option<Error> = None;
            let mut resolved = Vec::with_capacity(keys.len());
            for (key, slot) in keys.into_iter().zip(settled) {
                let slot = match slot {
                    Some(slot) => slot,
                    None => match outcomes.next() {
                        Some(outcome) => match inner.settle(&key, outcome, &invocation) {
                            Ok(slot) => slot,
                            Err(error) => {
                                first_failure.get_or_insert(error);
                                Slot::Recorded
                            }
                        },
                        None => Slot::Recorded,
                    },
                };
                resolved.push((key, slot));
            }

            match first_failure.or(failure) {
                Some(error) => Err(error),
                None => Ok(Some(inner.materialize(input, resolved))),
            }
        })
    }
}

impl ContainerInner {
    /// Keys in dispatch order with the child input and the child function;
    /// `None` marks an undeclared key.
    fn work_set(&self, input: &Value) -> Vec<(String, Option<Value>, Option<ValidationFunction>)> {
        match (&self.layout, input) {
            (Layout::Keyed(properties), Value::Object(map)) => {
                let declared = properties
                    .iter()
                    .map(|(key, function)| (key.clone(), map.get(key).cloned(), Some(function.clone())));
                let extra = map
                    .keys()
                    .filter(|key| !properties.iter().any(|(declared, _)| declared == *key))
                    .map(|key| (key.clone(), None, None));
                declared.chain(extra).collect()
            }
            (Layout::Collection(element), Value::Object(map)) => map
                .iter()
                .map(|(key, value)| (key.clone(), Some(value.clone()), Some(element.clone())))
                .collect(),
            (Layout::Collection(element), Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), Some(value.clone()), Some(element.clone())))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn child_path(&self, key: &str) -> String {
        match self.layout {
            Layout::Keyed(_) => self.namespace.clone(),
            Layout::Collection(_) => format!("{}.{}", self.namespace, key),
        }
    }

    /// Turn a settled child outcome into a slot, recording runtime errors when
    /// the call aggregates.
    fn settle(&self, key: &str, outcome: Outcome, invocation: &Invocation) -> Result<Slot, Error> {
        match outcome {
            Ok(Some(value)) => Ok(Slot::Value(value)),
            Ok(None) => Ok(Slot::Removed),
            Err(error) => {
                let path = self.child_path(key);
                self.record_or_raise(error.backfilled(Some(&path), None), &path, invocation)
            }
        }
    }

    fn reject_extra(&self, key: &str, input: &Value, invocation: &Invocation) -> Result<Slot, Error> {
        if !self.immutable && !invocation.is_aggregating() {
            ExtraKeyDropped {
                namespace: &self.namespace,
                key,
            }
            .log();
            return Ok(Slot::Removed);
        }

        let declared = match &self.layout {
            Layout::Keyed(properties) => properties
                .iter()
                .map(|(name, _)| Value::String(name.clone()))
                .collect(),
            Layout::Collection(_) => Vec::new(),
        };
        let error = ExpectationError::validation(
            self.namespace.as_str(),
            "object with properties",
            Some(input.clone()),
        )
        .with_expected_values(declared);
        self.record_or_raise(error.into(), &self.namespace, invocation)
    }

    fn record_or_raise(&self, error: Error, fallback_path: &str, invocation: &Invocation) -> Result<Slot, Error> {
        match error {
            Error::Expectation(expectation)
                if expectation.kind().is_runtime() && invocation.is_aggregating() =>
            {
                let path = expectation.path().unwrap_or(fallback_path).to_string();
                ErrorRecorded {
                    path: &path,
                    message: &expectation.display_message(),
                }
                .log();
                invocation.record(&path, expectation);
                Ok(Slot::Recorded)
            }
            other => Err(other),
        }
    }

    fn materialize(&self, input: Value, slots: Vec<(String, Slot)>) -> Value {
        match input {
            Value::Object(mut map) => {
                if self.immutable {
                    let mut fresh = Map::new();
                    for (key, slot) in slots {
                        if let Slot::Value(value) = slot {
                            fresh.insert(key, value);
                        }
                    }
                    Value::Object(fresh)
                } else {
                    for (key, slot) in slots {
                        match slot {
                            Slot::Value(value) => {
                                map.insert(key, value);
                            }
                            Slot::Removed => {
                                map.shift_remove(&key);
                            }
                            Slot::Recorded | Slot::Pending(_) => {}
                        }
                    }
                    Value::Object(map)
                }
            }
            Value::Array(items) => {
                let immutable = self.immutable;
                Value::Array(
                    items
                        .into_iter()
                        .zip(slots)
                        .filter_map(|(original, (_, slot))| match slot {
                            Slot::Value(value) => Some(value),
                            Slot::Recorded | Slot::Pending(_) if !immutable => Some(original),
                            _ => None,
                        })
                        .collect(),
                )
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExpectationKind;
    use serde_json::json;
    use std::time::Duration;

    fn passthrough() -> ValidationFunction {
        Arc::new(|value: Option<Value>, _: &Invocation| Evaluation::ready(value))
    }

    fn number() -> ValidationFunction {
        Arc::new(|value: Option<Value>, _: &Invocation| match value {
            Some(Value::Number(n)) => Evaluation::value(Value::Number(n)),
            other => Evaluation::fail(ExpectationError::processor_validation("number", other)),
        })
    }

    fn remove() -> ValidationFunction {
        Arc::new(|_: Option<Value>, _: &Invocation| Evaluation::ready(None))
    }

    fn delayed(millis: u64, function: ValidationFunction) -> ValidationFunction {
        Arc::new(move |value: Option<Value>, invocation: &Invocation| {
            let function = function.clone();
            let invocation = invocation.clone();
            Evaluation::pending(async move {
                tokio::time::sleep(Duration::from_millis(millis)).await;
                function.evaluate(value, &invocation).resolve().await
            })
        })
    }

    fn keyed(properties: Vec<(&str, ValidationFunction)>, immutable: bool) -> Container {
        Container::new(
            "$",
            Layout::Keyed(
                properties
                    .into_iter()
                    .map(|(key, function)| (key.to_string(), function))
                    .collect(),
            ),
            immutable,
        )
    }

    fn settled(evaluation: Evaluation) -> Outcome {
        match evaluation {
            Evaluation::Settled(outcome) => outcome,
            Evaluation::Pending(_) => panic!("evaluation should be settled"),
        }
    }

    #[test]
    fn test_keyed_shape_errors() {
        struct TestCase {
            name: &'static str,
            container: Container,
            input: Option<Value>,
            expected: &'static str,
        }

        let test_cases = vec![
            TestCase {
                name: "keyed rejects array",
                container: keyed(vec![("a", passthrough())], true),
                input: Some(json!([1])),
                expected: "[$] Expected value to be an object, got an array of value `[1]` instead",
            },
            TestCase {
                name: "keyed rejects absent",
                container: keyed(vec![("a", passthrough())], true),
                input: None,
                expected: "[$] Expected value to be an object, got `undefined` instead",
            },
            TestCase {
                name: "collection rejects string",
                container: Container::new("$.tags", Layout::Collection(passthrough()), true),
                input: Some(json!("a")),
                expected: "[$.tags] Expected value to be an array or an object, got a string of value `\"a\"` instead",
            },
            TestCase {
                name: "extra key",
                container: keyed(vec![("a", passthrough())], true),
                input: Some(json!({"a": 1, "b": 2})),
                expected: "[$] Expected value to be an object with properties in [\"a\"], got an object of value `{\"a\":1,\"b\":2}` instead",
            },
        ];

        for test_case in test_cases {
            let error = settled(test_case.container.evaluate(test_case.input, &Invocation::new()))
                .unwrap_err();
            assert_eq!(error.kind(), Some(ExpectationKind::Validation), "Test case '{}'", test_case.name);
            assert_eq!(error.to_string(), test_case.expected, "Test case '{}'", test_case.name);
        }
    }

    #[test]
    fn test_keyed_materialization() {
        let immutable = keyed(vec![("b", passthrough()), ("a", passthrough()), ("gone", remove())], true);
        let value = settled(immutable.evaluate(Some(json!({"a": 1, "gone": 3, "b": 2})), &Invocation::new()));
        assert_eq!(value.unwrap(), Some(json!({"b": 2, "a": 1})));

        let mutable = keyed(vec![("gone", remove()), ("a", passthrough())], false);
        let value = settled(mutable.evaluate(Some(json!({"a": 1, "gone": 3, "extra": 4})), &Invocation::new()));
        assert_eq!(value.unwrap(), Some(json!({"a": 1})));
    }

    #[test]
    fn test_collection_paths_and_compaction() {
        let container = Container::new("$.list", Layout::Collection(number()), true);
        let error = settled(container.evaluate(Some(json!([1, "x", 3])), &Invocation::new())).unwrap_err();
        assert_eq!(error.as_expectation().and_then(|e| e.path()), Some("$.list.1"));

        let dropping: ValidationFunction = Arc::new(|value: Option<Value>, _: &Invocation| match value {
            Some(Value::Null) => Evaluation::ready(None),
            other => Evaluation::ready(other),
        });
        for immutable in [true, false] {
            let container = Container::new("$.list", Layout::Collection(dropping.clone()), immutable);
            let value = settled(container.evaluate(Some(json!([1, null, 3])), &Invocation::new()));
            assert_eq!(value.unwrap(), Some(json!([1, 3])), "immutable={}", immutable);
        }
    }

    #[test]
    fn test_aggregating_records_and_continues() {
        let container = Container::new("$.list", Layout::Collection(number()), true);
        let invocation = Invocation::aggregating();
        let value = settled(container.evaluate(Some(json!(["a", 2, "c"])), &invocation));

        assert_eq!(value.unwrap(), Some(json!([2])));
        let full = invocation.aggregate().unwrap();
        assert_eq!(full.paths(), vec!["$.list.0", "$.list.2"]);
    }

    #[tokio::test]
    async fn test_first_failure_in_declared_order() {
        let container = keyed(
            vec![
                ("slow", delayed(20, number())),
                ("fast", delayed(1, number())),
            ],
            true,
        );

        let evaluation = container.evaluate(Some(json!({"slow": "a", "fast": "b"})), &Invocation::new());
        assert!(evaluation.is_pending());
        let error = evaluation.resolve().await.unwrap_err();
        assert!(error.to_string().contains("`\"a\"`"), "got: {}", error);
    }

    #[tokio::test]
    async fn test_pending_failure_precedes_later_sync_failure() {
        let container = keyed(vec![("first", delayed(5, number())), ("second", number())], true);

        let error = container
            .evaluate(Some(json!({"first": "a", "second": "b"})), &Invocation::new())
            .resolve()
            .await
            .unwrap_err();
        assert!(error.to_string().contains("`\"a\"`"), "got: {}", error);
    }

    #[tokio::test]
    async fn test_pending_children_joined() {
        let container = keyed(vec![("a", delayed(5, passthrough())), ("b", passthrough())], true);

        let value = container
            .evaluate(Some(json!({"a": 1, "b": 2})), &Invocation::new())
            .resolve()
            .await;
        assert_eq!(value.unwrap(), Some(json!({"a": 1, "b": 2})));
    }
}
