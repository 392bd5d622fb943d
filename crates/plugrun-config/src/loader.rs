// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./plugrun.toml` > `~/.config/plugrun/plugrun.toml` > `/etc/plugrun/plugrun.toml`
//! with environment variable overrides via `PLUGRUN_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PlugrunConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/plugrun/plugrun.toml` (system-wide)
/// 3. `~/.config/plugrun/plugrun.toml` (user XDG config)
/// 4. `./plugrun.toml` (local directory)
/// 5. `PLUGRUN_*` environment variables
pub fn load_config() -> Result<PlugrunConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string on top of the defaults only.
pub fn load_config_from_str(toml_content: &str) -> Result<PlugrunConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlugrunConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// Used when `--config` is given; the XDG hierarchy is skipped. A relative
/// path is taken as-is and not searched for in parent directories.
pub fn load_config_from_path(path: &Path) -> Result<PlugrunConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlugrunConfig::default()))
        .merge(Toml::file_exact(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for XDG config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PlugrunConfig::default()))
        .merge(Toml::file("/etc/plugrun/plugrun.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("plugrun/plugrun.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("plugrun.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `PLUGRUN_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` so keys containing
/// underscores survive: `PLUGRUN_RUNTIME_INHERIT_STDIO` must map to
/// `runtime.inherit_stdio`, not `runtime.inherit.stdio`.
fn env_provider() -> Env {
    Env::prefixed("PLUGRUN_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("unit_", "unit.", 1)
            .replacen("runtime_", "runtime.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}
