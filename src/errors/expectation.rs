// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Expectation errors: a failure described as "expected X, got Y" at a location.
//!
//! Every field that shapes the message (path, attribute, subject, expected
//! type(s), expected values, observed value) is stored as data and the message
//! is derived on read. Backfilling a path or attribute while an error travels
//! up through containers therefore never leaves a stale message behind.

use serde_json::Value;
use std::fmt;

use crate::config::consts::TEXT_MAX_LENGTH;

/// The four kinds of expectation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectationKind {
    /// Schema or option shape rejected by the compiler itself.
    Compilation,
    /// Attribute value or option rejected by a processor at compile time.
    ProcessorCompilation,
    /// Structural mismatch detected by the engine while validating a value.
    Validation,
    /// Rule violation raised by a processor transformer while validating a value.
    ProcessorValidation,
}

impl ExpectationKind {
    /// Runtime kinds are the only ones that may be aggregated.
    pub fn is_runtime(&self) -> bool {
        matches!(
            self,
            ExpectationKind::Validation | ExpectationKind::ProcessorValidation
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExpectationKind::Compilation => "CompilationError",
            ExpectationKind::ProcessorCompilation => "ProcessorCompilationError",
            ExpectationKind::Validation => "ValidationError",
            ExpectationKind::ProcessorValidation => "ProcessorValidationError",
        }
    }
}

impl fmt::Display for ExpectationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One or more expected type names, rendered as "a string or an array".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedType(pub Vec<String>);

impl ExpectedType {
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for ExpectedType {
    fn from(name: &str) -> Self {
        Self(vec![name.to_string()])
    }
}

impl From<String> for ExpectedType {
    fn from(name: String) -> Self {
        Self(vec![name])
    }
}

impl From<Vec<String>> for ExpectedType {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl From<&[&str]> for ExpectedType {
    fn from(names: &[&str]) -> Self {
        Self(names.iter().map(|name| name.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ExpectedType {
    fn from(names: [&str; N]) -> Self {
        Self(names.iter().map(|name| name.to_string()).collect())
    }
}

/// An "expected X, got Y" failure carrying its positional context.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectationError {
    kind: ExpectationKind,
    path: Option<String>,
    attribute: Option<String>,
    subject: String,
    expected_type: ExpectedType,
    expected_values: Option<Vec<Value>>,
    got: Option<Value>,
    custom_message: Option<String>,
}

impl ExpectationError {
    fn new(
        kind: ExpectationKind,
        path: Option<String>,
        subject: impl Into<String>,
        expected_type: impl Into<ExpectedType>,
        got: Option<Value>,
    ) -> Self {
        Self {
            kind,
            path,
            attribute: None,
            subject: subject.into(),
            expected_type: expected_type.into(),
            expected_values: None,
            got,
            custom_message: None,
        }
    }

    /// Schema or option shape error raised by the compiler at `path`.
    pub fn compilation(
        path: impl Into<String>,
        subject: impl Into<String>,
        expected_type: impl Into<ExpectedType>,
        got: Option<Value>,
    ) -> Self {
        Self::new(
            ExpectationKind::Compilation,
            Some(path.into()),
            subject,
            expected_type,
            got,
        )
    }

    /// Compile-time error raised by a processor; the compiler backfills the
    /// path and the attribute keyword.
    pub fn processor_compilation(
        subject: impl Into<String>,
        expected_type: impl Into<ExpectedType>,
        got: Option<Value>,
    ) -> Self {
        Self::new(
            ExpectationKind::ProcessorCompilation,
            None,
            subject,
            expected_type,
            got,
        )
    }

    /// Runtime shape error raised by the engine at `path`.
    pub fn validation(
        path: impl Into<String>,
        expected_type: impl Into<ExpectedType>,
        got: Option<Value>,
    ) -> Self {
        Self::new(
            ExpectationKind::Validation,
            Some(path.into()),
            "value",
            expected_type,
            got,
        )
    }

    /// Runtime rule error raised by a processor transformer.
    pub fn processor_validation(expected_type: impl Into<ExpectedType>, got: Option<Value>) -> Self {
        Self::new(
            ExpectationKind::ProcessorValidation,
            None,
            "value",
            expected_type,
            got,
        )
    }

    pub fn with_expected_values(mut self, values: Vec<Value>) -> Self {
        self.expected_values = Some(values);
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn with_custom_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }

    pub fn kind(&self) -> ExpectationKind {
        self.kind
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn expected_type(&self) -> &ExpectedType {
        &self.expected_type
    }

    pub fn expected_values(&self) -> Option<&[Value]> {
        self.expected_values.as_deref()
    }

    /// The observed value; `None` when the value was absent.
    pub fn got_value(&self) -> Option<&Value> {
        self.got.as_ref()
    }

    /// Type name of the observed value (`undefined` when absent).
    pub fn got_type(&self) -> &'static str {
        type_name(self.got.as_ref())
    }

    pub fn custom_message(&self) -> Option<&str> {
        self.custom_message.as_deref()
    }

    pub fn set_custom_message(&mut self, message: impl Into<String>) {
        self.custom_message = Some(message.into());
    }

    /// The custom message when one was attached, the derived message otherwise.
    pub fn display_message(&self) -> String {
        self.custom_message.clone().unwrap_or_else(|| self.message())
    }

    /// Fill in whatever positional context is still missing.
    ///
    /// An absent path takes `path` whole. A present path is merged segment by
    /// segment: non-empty segments already on the error win, empty or missing
    /// ones are taken from `path`. The attribute is only set when absent.
    pub fn backfill(&mut self, path: Option<&str>, attribute: Option<&str>) {
        if let Some(outer) = path.filter(|p| !p.is_empty()) {
            self.path = Some(match self.path.as_deref() {
                None | Some("") => outer.to_string(),
                Some(inner) => merge_paths(outer, inner),
            });
        }
        if self.attribute.is_none() {
            if let Some(attribute) = attribute {
                self.attribute = Some(attribute.to_string());
            }
        }
    }

    pub fn backfilled(mut self, path: Option<&str>, attribute: Option<&str>) -> Self {
        self.backfill(path, attribute);
        self
    }

    /// Derive the message from the current fields.
    pub fn message(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            parts.push(match &self.attribute {
                Some(attribute) => format!("[{}]({})", path, attribute),
                None => format!("[{}]", path),
            });
        }
        parts.push(format!("Expected {}", self.subject));

        let mut expectation = format!("to be {}", describe_types(self.expected_type.names()));
        if let Some(values) = &self.expected_values {
            expectation.push_str(&format!(" in {}", describe_values(values)));
        }
        expectation.push(',');
        parts.push(expectation);

        match self.got.as_ref() {
            None | Some(Value::Null) => {
                parts.push(format!("got `{}`", describe_value(self.got.as_ref())));
            }
            Some(got) => {
                parts.push(format!("got {}", describe_type(self.got_type())));
                parts.push(format!("of value `{}`", describe_value(Some(got))));
            }
        }
        parts.push("instead".to_string());

        parts.join(" ")
    }
}

impl fmt::Display for ExpectationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ExpectationError {}

/// JSON-ish type name of an optional value.
pub fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

fn merge_paths(outer: &str, inner: &str) -> String {
    let outer: Vec<&str> = outer.split('.').collect();
    let inner: Vec<&str> = inner.split('.').collect();
    let length = outer.len().max(inner.len());

    (0..length)
        .map(|i| match inner.get(i) {
            Some(segment) if !segment.is_empty() => *segment,
            _ => outer.get(i).copied().unwrap_or(""),
        })
        .collect::<Vec<_>>()
        .join(".")
}

fn describe_type(name: &str) -> String {
    if name == "undefined" || name == "null" {
        return name.to_string();
    }
    if ["a ", "an ", "of ", "`"].iter().any(|prefix| name.starts_with(prefix)) {
        return name.to_string();
    }
    match name.chars().next() {
        Some('a' | 'e' | 'i' | 'o') => format!("an {}", name),
        _ => format!("a {}", name),
    }
}

fn describe_types(names: &[String]) -> String {
    if names.is_empty() {
        return "a value".to_string();
    }
    names
        .iter()
        .map(|name| describe_type(name))
        .collect::<Vec<_>>()
        .join(" or ")
}

fn describe_value(value: Option<&Value>) -> String {
    let serialized = match value {
        None => "undefined".to_string(),
        Some(value) => match serde_json::to_string(value) {
            Ok(serialized) => serialized,
            Err(_) => return String::new(),
        },
    };

    if serialized.chars().count() > TEXT_MAX_LENGTH {
        let truncated: String = serialized.chars().take(TEXT_MAX_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        serialized
    }
}

fn describe_values(values: &[Value]) -> String {
    let texts: Vec<String> = values
        .iter()
        .map(|value| {
            let text = describe_value(Some(value));
            if text.is_empty() {
                "...".to_string()
            } else {
                text
            }
        })
        .collect();
    format!("[{}]", texts.join(", "))
}
