// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{Configuration, Options};
use crate::engine::Transformer;
use crate::errors::Result;
use crate::schema::Schema;
use crate::traits::ProcessingMediator;

/// Handler for one schema keyword.
///
/// Processors are registered once on a [`crate::config::ProcessorRegistry`] under
/// their keyword and shared by every compilation, so they hold no per-schema
/// state. The compiler drives them in three phases:
///
/// 1. [`validate_options`](AttributeProcessor::validate_options) when options
///    are resolved, in registration order
/// 2. [`validate_attribute_value`](AttributeProcessor::validate_attribute_value)
///    for every occurrence of the keyword in a schema
/// 3. [`process`](AttributeProcessor::process) to build the per-value
///    [`Transformer`] for one single-way schema
///
/// # Example
/// ```
/// use the_sieve::config::{Configuration, Options};
/// use the_sieve::engine::{Evaluation, Transformer};
/// use the_sieve::errors::Result;
/// use the_sieve::schema::Schema;
/// use the_sieve::traits::{AttributeProcessor, ProcessingMediator};
///
/// struct Trim;
///
/// impl AttributeProcessor for Trim {
///     fn validate_attribute_value(&self, value: &Schema) -> Result<Schema> {
///         Ok(value.clone())
///     }
///
///     fn process(
///         &self,
///         _attribute: Option<&Schema>,
///         _configuration: &Configuration,
///         _mediator: &dyn ProcessingMediator,
///     ) -> Result<Option<Transformer>> {
///         Ok(Some(Transformer::on_value(|value, _| {
///             Evaluation::ready(value.map(|v| match v.as_str() {
///                 Some(text) => serde_json::Value::from(text.trim()),
///                 None => v,
///             }))
///         })))
///     }
///
///     fn name(&self) -> &'static str {
///         "trim"
///     }
/// }
/// ```
pub trait AttributeProcessor: Send + Sync {
    /// Take part in every plan, even when the keyword is absent from the schema.
    fn always_active(&self) -> bool {
        false
    }

    /// Receive error flows instead of value flows.
    fn is_catcher(&self) -> bool {
        false
    }

    /// Options this processor handles, with their defaults.
    fn declared_options(&self) -> Options {
        Options::new()
    }

    fn validate_options(&self, configuration: Configuration) -> Result<Configuration> {
        Ok(configuration)
    }

    /// Normalize the raw attribute value found in a schema.
    fn validate_attribute_value(&self, value: &Schema) -> Result<Schema>;

    /// Build the per-value transformer, or `None` when the processor has
    /// nothing to contribute for this attribute.
    ///
    /// `attribute` is the normalized attribute value, absent only for
    /// always-active processors whose keyword is missing from the schema.
    fn process(
        &self,
        attribute: Option<&Schema>,
        configuration: &Configuration,
        mediator: &dyn ProcessingMediator,
    ) -> Result<Option<Transformer>>;

    fn name(&self) -> &'static str;
}
