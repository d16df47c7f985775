// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Configuration;
use crate::errors::Result;
use crate::schema::Schema;
use crate::traits::ValidationFunction;

/// Compilation surface handed to processors that embed nested schemas.
pub trait ProcessingMediator {
    /// Compile a container schema under an already resolved configuration.
    ///
    /// The caller derives `configuration` from its own (namespace, `list`),
    /// so the nested function reports paths below the caller's position.
    fn compile(&self, schema: &Schema, configuration: &Configuration) -> Result<ValidationFunction>;
}
