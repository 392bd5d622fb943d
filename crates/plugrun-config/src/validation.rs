// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! The unit name itself is not sanitized here: path separators are allowed
//! through to the loader, which only warns about them.

use crate::diagnostic::ConfigError;
use crate::model::PlugrunConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &PlugrunConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.unit.directory.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "unit.directory must not be empty".to_string(),
        });
    }

    if config.unit.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "unit.name must not be empty".to_string(),
        });
    }

    if config.unit.entry.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "unit.entry must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.log.level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
