// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Maximum rendered length of a value inside an error message before it is cut and suffixed with `...`
pub const TEXT_MAX_LENGTH: usize = 50;

/// Root path segment used when no namespace option is given
pub const DEFAULT_NAMESPACE: &str = "$";

/// Built-in option names
pub const ASYNC: &str = "async";
pub const FULL: &str = "full";
pub const IMMUTABLE: &str = "immutable";
pub const LIST: &str = "list";
pub const NAMESPACE: &str = "namespace";

/// Built-in options that must hold booleans
pub const BOOLEAN_OPTIONS: [&str; 4] = [ASYNC, FULL, IMMUTABLE, LIST];
