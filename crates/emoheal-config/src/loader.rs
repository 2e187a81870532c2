// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./emoheal.toml` > `~/.config/emoheal/emoheal.toml` > `/etc/emoheal/emoheal.toml`
//! with environment variable overrides via `EMOHEAL_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::EmohealConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/emoheal/emoheal.toml` (system-wide)
/// 3. `~/.config/emoheal/emoheal.toml` (user XDG config)
/// 4. `./emoheal.toml` (local directory)
/// 5. `EMOHEAL_*` environment variables
pub fn load_config() -> Result<EmohealConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EmohealConfig::default()))
        .merge(Toml::file("/etc/emoheal/emoheal.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("emoheal/emoheal.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("emoheal.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<EmohealConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EmohealConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<EmohealConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EmohealConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `EMOHEAL_STORAGE_DATABASE_PATH` must map
/// to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("EMOHEAL_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: EMOHEAL_STORAGE_DATABASE_PATH -> "storage_database_path"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("triage_", "triage.", 1)
            .replacen("responder_", "responder.", 1)
            .replacen("summary_", "summary.", 1);
        mapped.into()
    })
}
