// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod options;
mod registry;
mod resolver;

pub mod consts;

pub use loader::{load_document, load_options, load_schema, load_value, Format};
pub use options::{Configuration, Options};
pub use registry::ProcessorRegistry;
pub use resolver::resolve_configuration;
