// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Collects all errors instead of failing fast.

use crate::diagnostic::ConfigError;
use crate::model::SealnoteConfig;

/// Accepted log levels for `app.log_level`.
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Floor for `vault.kdf_iterations`. The shipped default is 1,000,000;
/// anything below this makes offline guessing too cheap to be worth
/// persisting a store for.
const MIN_KDF_ITERATIONS: u32 = 1_000;

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &SealnoteConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.app.log_level
            ),
        });
    }

    if config.vault.kdf_iterations < MIN_KDF_ITERATIONS {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.kdf_iterations must be at least {MIN_KDF_ITERATIONS}, got {}",
                config.vault.kdf_iterations
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
