// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the EmoHeal support chat backend.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level EmoHeal configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmohealConfig {
    /// Agent identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// HTTP/WebSocket gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Crisis triage keyword table settings.
    #[serde(default)]
    pub triage: TriageConfig,

    /// Therapeutic response template settings.
    #[serde(default)]
    pub responder: ResponderConfig,

    /// Query endpoint windowing settings.
    #[serde(default)]
    pub summary: SummaryConfig,
}

/// Agent identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// First message sent on every new chat connection.
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            welcome_message: default_welcome_message(),
        }
    }
}

fn default_agent_name() -> String {
    "emoheal".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_welcome_message() -> String {
    "Hello! I'm EmoHeal. How are you feeling today?".to_string()
}

/// HTTP/WebSocket gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Attach a permissive CORS layer (the dashboard frontend runs on a
    /// different origin in development).
    #[serde(default = "default_cors_permissive")]
    pub cors_permissive: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
            cors_permissive: default_cors_permissive(),
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8000
}

fn default_cors_permissive() -> bool {
    true
}

/// Storage backend configuration.
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
        .map(|p| p.join("emoheal").join("emoheal.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("emoheal.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Crisis triage keyword table configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriageConfig {
    /// Path to a TOML keyword lexicon. `None` uses the compiled-in default.
    #[serde(default)]
    pub lexicon_path: Option<String>,
}

/// Therapeutic response template configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResponderConfig {
    /// Path to a TOML template table. `None` uses the compiled-in default.
    #[serde(default)]
    pub templates_path: Option<String>,
}

/// Query endpoint windowing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryConfig {
    /// Default mood-summary window in days.
    #[serde(default = "default_summary_days")]
    pub default_days: i64,

    /// Maximum accepted mood-summary window in days.
    #[serde(default = "default_max_days")]
    pub max_days: i64,

    /// Maximum page size for chat history queries.
    #[serde(default = "default_history_page_limit")]
    pub history_page_limit: i64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            default_days: default_summary_days(),
            max_days: default_max_days(),
            history_page_limit: default_history_page_limit(),
        }
    }
}

fn default_summary_days() -> i64 {
    7
}

fn default_max_days() -> i64 {
    90
}

fn default_history_page_limit() -> i64 {
    500
}
