// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./sealnote.toml` > `~/.config/sealnote/sealnote.toml`
//! > `/etc/sealnote/sealnote.toml`, with environment variable overrides via
//! the `SEALNOTE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SealnoteConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sealnote/sealnote.toml` (system-wide)
/// 3. `~/.config/sealnote/sealnote.toml` (user XDG config)
/// 4. `./sealnote.toml` (local directory)
/// 5. `SEALNOTE_*` environment variables
pub fn load_config() -> Result<SealnoteConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SealnoteConfig::default()))
        .merge(Toml::file("/etc/sealnote/sealnote.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("sealnote/sealnote.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("sealnote.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SealnoteConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SealnoteConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SealnoteConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SealnoteConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that key names
/// containing underscores stay intact: `SEALNOTE_VAULT_KDF_ITERATIONS`
/// must map to `vault.kdf_iterations`, not `vault.kdf.iterations`.
fn env_provider() -> Env {
    Env::prefixed("SEALNOTE_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("app_", "app.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("vault_", "vault.", 1);
        mapped.into()
    })
}
