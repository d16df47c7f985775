// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::consts::{ASYNC, DEFAULT_NAMESPACE, FULL, IMMUTABLE, LIST, NAMESPACE};

/// Caller-supplied compilation options.
///
/// A flat map of option name to JSON value, as written by the caller or read
/// from a file. Nothing is checked here; [`crate::config::resolve_configuration`]
/// merges these with the defaults and rejects unknown names.
///
/// # Example
/// ```yaml
/// namespace: order
/// full: true
/// convert: false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(Map<String, Value>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Options {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// Resolved, validated options for one compilation scope.
///
/// Holds every allowed option with its effective value. Processors that compile
/// nested schemas derive a child scope with [`Configuration::with`]; the
/// original is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    values: Map<String, Value>,
}

impl Configuration {
    /// Built-in option defaults.
    pub fn builtin_defaults() -> Map<String, Value> {
        let mut values = Map::new();
        values.insert(ASYNC.to_string(), Value::Bool(false));
        values.insert(FULL.to_string(), Value::Bool(false));
        values.insert(IMMUTABLE.to_string(), Value::Bool(true));
        values.insert(LIST.to_string(), Value::Bool(false));
        values.insert(
            NAMESPACE.to_string(),
            Value::String(DEFAULT_NAMESPACE.to_string()),
        );
        values
    }

    pub(crate) fn from_values(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn is_async(&self) -> bool {
        self.flag(ASYNC)
    }

    pub fn full(&self) -> bool {
        self.flag(FULL)
    }

    pub fn immutable(&self) -> bool {
        self.flag(IMMUTABLE)
    }

    pub fn list(&self) -> bool {
        self.flag(LIST)
    }

    pub fn namespace(&self) -> &str {
        self.values
            .get(NAMESPACE)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Boolean option value; anything that is not `true` reads as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.values.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Derived scope with one option replaced.
    pub fn with(&self, name: &str, value: impl Into<Value>) -> Self {
        let mut values = self.values.clone();
        values.insert(name.to_string(), value.into());
        Self { values }
    }

    /// Replace an option in place; used by processors while validating options.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    pub fn to_options(&self) -> Options {
        Options(self.values.clone())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::from_values(Self::builtin_defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_from_yaml() {
        let yaml = r#"
namespace: order
full: true
validation:
  minimum: 3
"#;
        let options: Options = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(options.get("namespace"), Some(&json!("order")));
        assert_eq!(options.get("validation"), Some(&json!({"minimum": 3})));
    }

    #[test]
    fn test_options_builder() {
        let options = Options::new().with("async", true).with("namespace", "root");
        assert!(options.contains("async"));
        assert_eq!(options.names().cloned().collect::<Vec<_>>(), vec!["async", "namespace"]);

        let collected: Options = vec![("list", json!(true))].into_iter().collect();
        assert_eq!(collected.get("list"), Some(&json!(true)));
    }

    #[test]
    fn test_configuration_defaults() {
        let configuration = Configuration::default();
        assert!(!configuration.is_async());
        assert!(!configuration.full());
        assert!(configuration.immutable());
        assert!(!configuration.list());
        assert_eq!(configuration.namespace(), "$");
    }

    #[test]
    fn test_configuration_with_leaves_original_untouched() {
        let configuration = Configuration::default();
        let child = configuration.with(NAMESPACE, "$.items").with(LIST, true);

        assert_eq!(child.namespace(), "$.items");
        assert!(child.list());
        assert_eq!(configuration.namespace(), "$");
        assert!(!configuration.list());
        assert_eq!(child.to_options().get(NAMESPACE), Some(&json!("$.items")));
    }
}
