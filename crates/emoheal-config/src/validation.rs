// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-empty paths, and sane
//! summary windows.

use crate::diagnostic::ConfigError;
use crate::model::EmohealConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &EmohealConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate gateway host is not empty
    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    }

    // Validate gateway host looks like a valid IP or hostname
    if !config.gateway.host.trim().is_empty() {
        let addr = config.gateway.host.trim();
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!(
                    "gateway.host `{addr}` is not a valid IP address or hostname"
                ),
            });
        }
    }

    // Validate database_path is not empty
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate welcome message is not empty (the first frame on every socket)
    if config.agent.welcome_message.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.welcome_message must not be empty".to_string(),
        });
    }

    // Validate summary windows
    if config.summary.default_days < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "summary.default_days must be at least 1, got {}",
                config.summary.default_days
            ),
        });
    }

    if config.summary.max_days < config.summary.default_days {
        errors.push(ConfigError::Validation {
            message: format!(
                "summary.max_days ({}) must be >= summary.default_days ({})",
                config.summary.max_days, config.summary.default_days
            ),
        });
    }

    if config.summary.history_page_limit < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "summary.history_page_limit must be at least 1, got {}",
                config.summary.history_page_limit
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = EmohealConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = EmohealConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))));
    }

    #[test]
    fn empty_welcome_message_fails_validation() {
        let mut config = EmohealConfig::default();
        config.agent.welcome_message = "   ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("welcome_message"))));
    }

    #[test]
    fn inverted_summary_windows_fail_validation() {
        let mut config = EmohealConfig::default();
        config.summary.default_days = 30;
        config.summary.max_days = 7;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("max_days"))));
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = EmohealConfig::default();
        config.gateway.host = "0.0.0.0".to_string();
        config.storage.database_path = "/tmp/test.db".to_string();
        config.summary.default_days = 14;
        config.summary.max_days = 60;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn config_sections_deny_unknown_fields() {
        let toml_str = r#"
[agent]
name = "test"
unknown_field = "bad"
"#;
        let result = toml::from_str::<EmohealConfig>(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn triage_and_responder_paths_default_to_none() {
        let config = EmohealConfig::default();
        assert!(config.triage.lexicon_path.is_none());
        assert!(config.responder.templates_path.is_none());
    }
}
