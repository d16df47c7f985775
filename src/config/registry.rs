// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::processors::{
    DefaultProcessor, ErrorProcessor, FormatProcessor, ItemsProcessor, PropertiesProcessor,
    RequiredProcessor, TypeProcessor, ValidateProcessor,
};
use crate::traits::AttributeProcessor;

/// Ordered registry mapping schema keywords to their attribute processors.
///
/// Registration order is significant: it is the order in which processors
/// validate options and the order of the steps in every processing plan.
/// Processors are wrapped in `Arc<dyn AttributeProcessor>` so the registry can
/// be cloned into several compilers without copying processor instances.
///
/// # Examples
///
/// ## Standard keyword set
/// ```
/// use the_sieve::config::ProcessorRegistry;
///
/// let registry = ProcessorRegistry::standard();
/// assert_eq!(
///     registry.keywords(),
///     vec!["format", "default", "required", "type", "items", "properties", "validate", "error"]
/// );
/// ```
///
/// ## Custom registry
/// ```
/// use std::sync::Arc;
/// use the_sieve::config::ProcessorRegistry;
/// use the_sieve::processors::{RequiredProcessor, TypeProcessor};
///
/// let mut registry = ProcessorRegistry::new();
/// registry.register("type", Arc::new(TypeProcessor));
/// registry.register("required", Arc::new(RequiredProcessor));
///
/// assert!(registry.contains("type"));
/// assert_eq!(registry.keywords(), vec!["type", "required"]);
/// ```
#[derive(Clone, Default)]
pub struct ProcessorRegistry {
    entries: Vec<(String, Arc<dyn AttributeProcessor>)>,
}

impl ProcessorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the standard keyword processors
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry
            .register("format", Arc::new(FormatProcessor))
            .register("default", Arc::new(DefaultProcessor))
            .register("required", Arc::new(RequiredProcessor))
            .register("type", Arc::new(TypeProcessor))
            .register("items", Arc::new(ItemsProcessor))
            .register("properties", Arc::new(PropertiesProcessor))
            .register("validate", Arc::new(ValidateProcessor))
            .register("error", Arc::new(ErrorProcessor));
        registry
    }

    /// Register a processor under `keyword`.
    ///
    /// Re-registering a keyword replaces its processor and keeps its position.
    pub fn register(
        &mut self,
        keyword: impl Into<String>,
        processor: Arc<dyn AttributeProcessor>,
    ) -> &mut Self {
        let keyword = keyword.into();
        match self.entries.iter_mut().find(|(name, _)| *name == keyword) {
            Some(entry) => entry.1 = processor,
            None => self.entries.push((keyword, processor)),
        }
        self
    }

    /// Get a processor by keyword
    pub fn get(&self, keyword: &str) -> Option<&Arc<dyn AttributeProcessor>> {
        self.entries
            .iter()
            .find(|(name, _)| name == keyword)
            .map(|(_, processor)| processor)
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.get(keyword).is_some()
    }

    /// Keywords in registration order
    pub fn keywords(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn AttributeProcessor>)> {
        self.entries
            .iter()
            .map(|(name, processor)| (name.as_str(), processor))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorRegistry")
            .field("processor_count", &self.entries.len())
            .field("keywords", &self.keywords())
            .finish()
    }
}
