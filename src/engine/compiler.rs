// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Schema compiler.
//!
//! Turns a schema and caller options into a tree of validation functions:
//! containers at the root and wherever `items`/`properties` embed a nested
//! schema, multi-way alternatives where a position holds a list of ways, and a
//! processing plan for every single way.

use serde_json::Value;
use std::sync::Arc;

use crate::config::consts::NAMESPACE;
use crate::config::{resolve_configuration, Configuration, Options, ProcessorRegistry};
use crate::engine::container::{Container, Layout};
use crate::engine::plan::{ProcessingPlan, Step};
use crate::engine::ways::MultiWay;
use crate::engine::{Validator, ValidatorBuilder};
use crate::errors::{Error, ExpectationError, Result};
use crate::observability::messages::compilation::{CompilationFailed, PlanBuilt, SchemaCompiled};
use crate::observability::messages::StructuredLog;
use crate::schema::Schema;
use crate::traits::{ProcessingMediator, ValidationFunction};

const KEYED_SCHEMA: &str = "object with properties whose values are validation processor attributes";
const COLLECTION_SCHEMA: &str = "object whose properties are validation processor attributes";

/// Compiles schemas against an ordered processor registry.
///
/// # Example
/// ```
/// use serde_json::json;
/// use the_sieve::config::Options;
/// use the_sieve::engine::Compiler;
/// use the_sieve::schema::Schema;
///
/// let compiler = Compiler::standard();
/// let schema = Schema::from(json!({
///     "name": {"type": "string", "required": true},
///     "age": {"type": "integer", "default": 0},
/// }));
/// let validator = compiler.compile(&schema, &Options::new()).unwrap();
///
/// let value = validator.validate(json!({"name": "Ada"})).settled().unwrap().unwrap();
/// assert_eq!(value, json!({"name": "Ada", "age": 0}));
/// ```
#[derive(Debug, Clone)]
pub struct Compiler {
    registry: ProcessorRegistry,
}

impl Compiler {
    pub fn new(registry: ProcessorRegistry) -> Self {
        Self { registry }
    }

    /// Compiler preloaded with the standard keyword processors.
    pub fn standard() -> Self {
        Self::new(ProcessorRegistry::standard())
    }

    pub fn registry(&self) -> &ProcessorRegistry {
        &self.registry
    }

    /// Compile `schema` into a validator handle.
    pub fn compile(&self, schema: &Schema, options: &Options) -> Result<Validator> {
        let configuration = resolve_configuration(options, &self.registry)?;
        let function = self.compile_container(schema, &configuration)?;
        Ok(ValidatorBuilder::from_configuration(&configuration).build(function))
    }

    /// Compile `schema` into a bare validation function.
    ///
    /// The function runs fail-fast unless the caller evaluates it with an
    /// aggregating [`crate::engine::Invocation`]; `async` is not applied.
    pub fn process(&self, schema: &Schema, options: &Options) -> Result<ValidationFunction> {
        let configuration = resolve_configuration(options, &self.registry)?;
        self.compile_container(schema, &configuration)
    }

    fn compile_container(&self, schema: &Schema, configuration: &Configuration) -> Result<ValidationFunction> {
        let namespace = configuration.namespace();
        let result = if configuration.list() {
            self.compile_collection(schema, configuration)
        } else {
            self.compile_keyed(schema, configuration)
        };

        if let Err(error) = &result {
            CompilationFailed {
                namespace,
                error,
            }
            .log();
        }
        result
    }

    fn compile_keyed(&self, schema: &Schema, configuration: &Configuration) -> Result<ValidationFunction> {
        let namespace = configuration.namespace();
        let entries = schema.as_entries().ok_or_else(|| {
            schema_error(namespace, KEYED_SCHEMA, schema)
        })?;

        let mut properties = Vec::with_capacity(entries.len());
        for (property, child) in entries {
            let child_configuration =
                configuration.with(NAMESPACE, format!("{}.{}", namespace, property));
            properties.push((property.clone(), self.compile_position(child, &child_configuration)?));
        }

        SchemaCompiled {
            namespace,
            mode: "keyed",
            entry_count: properties.len(),
        }
        .log();

        Ok(Arc::new(Container::new(
            namespace,
            Layout::Keyed(properties),
            configuration.immutable(),
        )))
    }

    fn compile_collection(&self, schema: &Schema, configuration: &Configuration) -> Result<ValidationFunction> {
        let namespace = configuration.namespace();
        if !schema.is_map() && !schema.is_list() {
            return Err(schema_error(namespace, COLLECTION_SCHEMA, schema));
        }

        let element_configuration = configuration.with(NAMESPACE, format!("{}.", namespace));
        let element = self.compile_position(schema, &element_configuration)?;

        SchemaCompiled {
            namespace,
            mode: "collection",
            entry_count: 1,
        }
        .log();

        Ok(Arc::new(Container::new(
            namespace,
            Layout::Collection(element),
            configuration.immutable(),
        )))
    }

    /// Compile the schema of one value position: a single way or a list of ways.
    fn compile_position(&self, schema: &Schema, configuration: &Configuration) -> Result<ValidationFunction> {
        let namespace = configuration.namespace();
        match schema {
            Schema::Map(entries) => Ok(Arc::new(self.compile_way(entries, configuration)?)),
            Schema::List(ways) => {
                let mut functions: Vec<ValidationFunction> = Vec::with_capacity(ways.len());
                for way in ways {
                    let entries = way
                        .as_entries()
                        .ok_or_else(|| schema_error(namespace, ["object", "array of objects"], way))?;
                    functions.push(Arc::new(self.compile_way(entries, configuration)?));
                }
                let rendered = ways.iter().map(Schema::to_value).collect();
                Ok(Arc::new(MultiWay::new(namespace, functions, rendered)))
            }
            other => Err(schema_error(namespace, ["object", "array of objects"], other)),
        }
    }

    fn compile_way(&self, entries: &[(String, Schema)], configuration: &Configuration) -> Result<ProcessingPlan> {
        let namespace = configuration.namespace();

        let mut normalized: Vec<(&str, Schema)> = Vec::with_capacity(entries.len());
        for (keyword, raw) in entries {
            let processor = self.registry.get(keyword).ok_or_else(|| {
                Error::from(
                    ExpectationError::compilation(
                        namespace,
                        "schema attribute name",
                        "string",
                        Some(Value::String(keyword.clone())),
                    )
                    .with_expected_values(
                        self.registry
                            .keywords()
                            .into_iter()
                            .map(|name| Value::String(name.to_string()))
                            .collect(),
                    ),
                )
            })?;
            let attribute = processor
                .validate_attribute_value(raw)
                .map_err(|error| error.backfilled(Some(namespace), Some(keyword.as_str())))?;
            normalized.push((keyword.as_str(), attribute));
        }

        let mut steps = Vec::new();
        for (keyword, processor) in self.registry.iter() {
            let attribute = normalized
                .iter()
                .find(|(name, _)| *name == keyword)
                .map(|(_, attribute)| attribute);
            if attribute.is_none() && !processor.always_active() {
                continue;
            }

            let transformer = processor
                .process(attribute, configuration, self)
                .map_err(|error| error.backfilled(Some(namespace), Some(keyword)))?;
            if let Some(transformer) = transformer {
                steps.push(Step {
                    keyword: keyword.to_string(),
                    catcher: processor.is_catcher(),
                    transformer,
                });
            }
        }

        let plan = ProcessingPlan::new(namespace, steps);
        PlanBuilt {
            namespace,
            steps: &plan.keywords(),
        }
        .log();
        Ok(plan)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::standard()
    }
}

impl ProcessingMediator for Compiler {
    fn compile(&self, schema: &Schema, configuration: &Configuration) -> Result<ValidationFunction> {
        self.compile_container(schema, configuration)
    }
}

fn schema_error(
    namespace: &str,
    expected_type: impl Into<crate::errors::ExpectedType>,
    schema: &Schema,
) -> Error {
    ExpectationError::compilation(namespace, "schema", expected_type, Some(schema.to_value())).into()
}
