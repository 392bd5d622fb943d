// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for plugrun.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level plugrun configuration.
///
/// Every section is optional; with no file and no environment the compiled-in
/// defaults load `./HelloWorldPlugin.wasm` and call `execute`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlugrunConfig {
    /// Which unit to load and which entry operation to call.
    #[serde(default)]
    pub unit: UnitConfig,

    /// Execution environment offered to the unit.
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// The single code unit this process loads and runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UnitConfig {
    /// Directory holding `<name>.wasm`. Relative paths resolve against the
    /// working directory.
    #[serde(default = "default_unit_directory")]
    pub directory: String,

    /// Unit name, without extension.
    #[serde(default = "default_unit_name")]
    pub name: String,

    /// Exported zero-parameter function to call.
    #[serde(default = "default_unit_entry")]
    pub entry: String,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            directory: default_unit_directory(),
            name: default_unit_name(),
            entry: default_unit_entry(),
        }
    }
}

fn default_unit_directory() -> String {
    "./".to_string()
}

fn default_unit_name() -> String {
    "HelloWorldPlugin".to_string()
}

fn default_unit_entry() -> String {
    "execute".to_string()
}

/// Runtime settings for constructing and invoking the unit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Route the unit's console output (WASI stdio and `plugrun.print`)
    /// to this process's stdio.
    #[serde(default = "default_true")]
    pub inherit_stdio: bool,

    /// Capture wasm backtraces in trap diagnostics.
    #[serde(default = "default_true")]
    pub wasm_backtrace: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            inherit_stdio: true,
            wasm_backtrace: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging configuration. `RUST_LOG` overrides `level` when set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
