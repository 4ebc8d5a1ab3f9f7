// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model types.
//!
//! All sections use `deny_unknown_fields` so typos surface as diagnostics
//! instead of being silently ignored.

use serde::{Deserialize, Serialize};

/// Root configuration for Sealnote.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SealnoteConfig {
    /// Application-level settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Record store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Key-derivation settings.
    #[serde(default)]
    pub vault: VaultConfig,
}

/// Application-level settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Log level for the tracing subscriber (`error`, `warn`, `info`,
    /// `debug`, `trace`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Record store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("sealnote").join("sealnote.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("sealnote.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Key-derivation configuration.
///
/// Only the salt is ever persisted to the store. The iteration count and
/// hash live here, in code: changing them on a store with existing
/// records makes the payload underivable without an explicit migration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// PBKDF2-HMAC-SHA256 iteration count (default: 1,000,000).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            kdf_iterations: default_kdf_iterations(),
        }
    }
}

fn default_kdf_iterations() -> u32 {
    1_000_000
}
