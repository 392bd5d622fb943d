// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for plugrun.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, `PLUGRUN_*` environment overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use plugrun_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("unit: {}", config.unit.name);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

use tracing::debug;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{LogConfig, PlugrunConfig, RuntimeConfig, UnitConfig};

/// Load configuration from the XDG hierarchy and environment, then validate it.
pub fn load_and_validate() -> Result<PlugrunConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from an explicit file (plus environment) and validate it.
///
/// The file must exist and be readable; it is never silently skipped.
pub fn load_and_validate_path(path: &Path) -> Result<PlugrunConfig, Vec<ConfigError>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        vec![ConfigError::Other(format!(
            "cannot read config file {}: {e}",
            path.display()
        ))]
    })?;
    finish(loader::load_config_from_path(path), || {
        vec![(path.display().to_string(), content)]
    })
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<PlugrunConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Validates an extracted config, or converts the extraction error using the
/// TOML sources `sources` yields for span lookup.
fn finish(
    extracted: Result<PlugrunConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<PlugrunConfig, Vec<ConfigError>> {
    match extracted {
        Ok(config) => {
            validation::validate_config(&config)?;
            debug!(
                directory = %config.unit.directory,
                unit = %config.unit.name,
                entry = %config.unit.entry,
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = vec![std::path::PathBuf::from("/etc/plugrun/plugrun.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("plugrun/plugrun.toml"));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("plugrun.toml"));
    }

    candidates
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
