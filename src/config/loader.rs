// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::config::Options;
use crate::errors::LoadError;
use crate::schema::Schema;

/// Serialization format of a file, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }
}

/// Load and deserialize a YAML, JSON or TOML file.
pub fn load_document<T, P>(path: P) -> Result<T, LoadError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        Format::Yaml => serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
        Format::Json => serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Format::Toml => toml::from_str(&content).map_err(|source| LoadError::Toml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load compilation options from a file
///
/// # Example
/// ```yaml
/// namespace: order
/// full: true
/// required: true
/// ```
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<Options, LoadError> {
    load_document(path)
}

/// Load a data-only schema from a file.
///
/// Function attributes (`format`, `validate`) cannot be expressed in a file;
/// attach them in code after loading.
///
/// # Example
/// ```yaml
/// id:
///   type: integer
///   required: true
/// tags:
///   items:
///     type: string
/// ```
pub fn load_schema<P: AsRef<Path>>(path: P) -> Result<Schema, LoadError> {
    load_document(path)
}

/// Load an arbitrary document to validate
pub fn load_value<P: AsRef<Path>>(path: P) -> Result<Value, LoadError> {
    load_document(path)
}
