// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Raw schema tree as authored, before any processor normalizes it.
//!
//! A schema is JSON-shaped data plus one extra leaf kind, [`Schema::Function`],
//! for the callbacks the `format` and `validate` keywords take. Map entries keep
//! their declared order, which is the order properties are dispatched in.
//!
//! ```
//! use serde_json::json;
//! use the_sieve::schema::Schema;
//!
//! let schema = Schema::from(json!({
//!     "name": {"type": "string", "required": true},
//!     "tags": {"items": {"type": "string"}},
//! }));
//! assert_eq!(schema.keys(), vec!["name", "tags"]);
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use crate::engine::Evaluation;

/// Callback attached to a schema attribute.
///
/// Receives the current value (`None` when absent) and the context payload of
/// the owning processor's option (`formatting` or `validation`).
pub type Callback = Arc<dyn Fn(Option<Value>, &Value) -> Evaluation + Send + Sync>;

#[derive(Clone)]
pub enum Schema {
    /// Ordered keyword/property map.
    Map(Vec<(String, Schema)>),
    /// Ordered sequence, e.g. the ways of a multi-way schema.
    List(Vec<Schema>),
    /// JSON scalar or literal data.
    Data(Value),
    Function(Callback),
}

impl Schema {
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        Schema::Map(
            entries
                .into_iter()
                .map(|(key, schema)| (key.into(), schema))
                .collect(),
        )
    }

    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Schema>,
    {
        Schema::List(items.into_iter().collect())
    }

    pub fn function<F>(callback: F) -> Self
    where
        F: Fn(Option<Value>, &Value) -> Evaluation + Send + Sync + 'static,
    {
        Schema::Function(Arc::new(callback))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Schema::Map(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Schema::List(_))
    }

    pub fn as_entries(&self) -> Option<&[(String, Schema)]> {
        match self {
            Schema::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&[Schema]> {
        match self {
            Schema::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Schema::Data(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Callback> {
        match self {
            Schema::Function(callback) => Some(callback),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_data().and_then(Value::as_str)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_data().and_then(Value::as_bool)
    }

    /// Look up a map entry by key.
    pub fn get(&self, key: &str) -> Option<&Schema> {
        self.as_entries()?
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, schema)| schema)
    }

    /// Keys of a map schema in declared order; empty for other shapes.
    pub fn keys(&self) -> Vec<&str> {
        self.as_entries()
            .map(|entries| entries.iter().map(|(key, _)| key.as_str()).collect())
            .unwrap_or_default()
    }

    /// Render as JSON. Functions are dropped from maps and become `null`
    /// inside lists.
    pub fn to_value(&self) -> Value {
        match self {
            Schema::Map(entries) => Value::Object(
                entries
                    .iter()
                    .filter(|(_, schema)| !matches!(schema, Schema::Function(_)))
                    .map(|(key, schema)| (key.clone(), schema.to_value()))
                    .collect::<Map<String, Value>>(),
            ),
            Schema::List(items) => Value::Array(items.iter().map(Schema::to_value).collect()),
            Schema::Data(value) => value.clone(),
            Schema::Function(_) => Value::Null,
        }
    }
}

impl From<Value> for Schema {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Schema::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Schema::from(value)))
                    .collect(),
            ),
            Value::Array(items) => Schema::List(items.into_iter().map(Schema::from).collect()),
            scalar => Schema::Data(scalar),
        }
    }
}

impl From<&str> for Schema {
    fn from(value: &str) -> Self {
        Schema::Data(Value::String(value.to_string()))
    }
}

impl From<bool> for Schema {
    fn from(value: bool) -> Self {
        Schema::Data(Value::Bool(value))
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Schema::from)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Map(entries) => f
                .debug_map()
                .entries(entries.iter().map(|(key, schema)| (key, schema)))
                .finish(),
            Schema::List(items) => f.debug_list().entries(items).finish(),
            Schema::Data(value) => write!(f, "{}", value),
            Schema::Function(_) => f.write_str("<function>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_keeps_declared_order() {
        let schema = Schema::from(json!({"zeta": {"type": "string"}, "alpha": {"type": "number"}}));
        assert_eq!(schema.keys(), vec!["zeta", "alpha"]);
        assert_eq!(schema.get("alpha").and_then(|s| s.get("type")).and_then(Schema::as_str), Some("number"));
        assert!(schema.get("missing").is_none());
    }

    #[test]
    fn test_to_value_drops_functions() {
        let schema = Schema::map([
            ("type", Schema::from("string")),
            ("format", Schema::function(|value, _| Evaluation::ready(value))),
        ]);
        assert_eq!(schema.to_value(), json!({"type": "string"}));

        let ways = Schema::list([
            Schema::from(json!({"type": "number"})),
            Schema::function(|value, _| Evaluation::ready(value)),
        ]);
        assert_eq!(ways.to_value(), json!([{"type": "number"}, null]));
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let yaml = "name:\n  type: string\n  required: true\ntags:\n  - type: string\n  - type: array\n";
        let schema: Schema = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(schema.keys(), vec!["name", "tags"]);
        assert_eq!(schema.get("name").and_then(|s| s.get("required")).and_then(Schema::as_bool), Some(true));
        assert_eq!(schema.get("tags").and_then(Schema::as_items).map(<[Schema]>::len), Some(2));
    }

    #[test]
    fn test_debug_output() {
        let schema = Schema::map([("validate", Schema::function(|value, _| Evaluation::ready(value)))]);
        assert_eq!(format!("{:?}", schema), "{\"validate\": <function>}");
    }
}
