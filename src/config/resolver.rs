// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::{Map, Value};

use crate::config::consts::{BOOLEAN_OPTIONS, DEFAULT_NAMESPACE, NAMESPACE};
use crate::config::{Configuration, Options, ProcessorRegistry};
use crate::errors::{ExpectationError, Result};
use crate::observability::messages::compilation::{OptionsResolved, UnknownOption};
use crate::observability::messages::StructuredLog;

/// Resolve caller options against the built-in defaults and the options
/// declared by every registered processor.
///
/// Resolution runs in three stages:
/// 1. unknown option names are rejected, listing the sorted allowed names
/// 2. built-in options are type checked
/// 3. the merged configuration is passed through each processor's
///    `validate_options`, in registration order
///
/// Errors are reported at the caller's namespace when it is a string, `$`
/// otherwise.
pub fn resolve_configuration(
    options: &Options,
    registry: &ProcessorRegistry,
) -> Result<Configuration> {
    let path = options
        .get(NAMESPACE)
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_NAMESPACE)
        .to_string();

    let mut merged = Configuration::builtin_defaults();
    for (_, processor) in registry.iter() {
        for (name, value) in processor.declared_options().iter() {
            merged.insert(name.clone(), value.clone());
        }
    }

    if let Some(unknown) = options.names().find(|name| !merged.contains_key(*name)) {
        UnknownOption {
            name: unknown,
            namespace: &path,
        }
        .log();
        let mut allowed: Vec<&String> = merged.keys().collect();
        allowed.sort();
        return Err(ExpectationError::compilation(
            path.as_str(),
            "option name",
            "string",
            Some(Value::String(unknown.clone())),
        )
        .with_expected_values(allowed.into_iter().map(|name| Value::String(name.clone())).collect())
        .into());
    }

    for (name, value) in options.iter() {
        merged.insert(name.clone(), value.clone());
    }
    check_builtin_options(&merged, &path)?;

    let mut configuration = Configuration::from_values(merged);
    for (_, processor) in registry.iter() {
        configuration = processor
            .validate_options(configuration)
            .map_err(|error| error.backfilled(Some(&path), None))?;
    }

    OptionsResolved {
        namespace: configuration.namespace(),
        option_count: configuration.names().count(),
        is_async: configuration.is_async(),
        full: configuration.full(),
    }
    .log();

    Ok(configuration)
}

fn check_builtin_options(values: &Map<String, Value>, path: &str) -> Result<()> {
    for name in BOOLEAN_OPTIONS {
        let value = values.get(name);
        if !matches!(value, Some(Value::Bool(_))) {
            return Err(ExpectationError::compilation(
                path,
                format!("'{}' option", name),
                "boolean",
                value.cloned(),
            )
            .into());
        }
    }

    let namespace = values.get(NAMESPACE);
    if !matches!(namespace, Some(Value::String(_))) {
        return Err(ExpectationError::compilation(
            path,
            format!("'{}' option", NAMESPACE),
            "string",
            namespace.cloned(),
        )
        .into());
    }

    Ok(())
}
