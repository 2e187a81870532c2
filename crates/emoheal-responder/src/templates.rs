// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Therapeutic response template tables loaded from a TOML document.

use std::collections::HashMap;

use serde::Deserialize;

use emoheal_core::EmohealError;

/// Compiled-in default templates, used when no `responder.templates_path` is set.
const BUILTIN_TEMPLATES: &str = include_str!("../data/therapeutic_templates.toml");

/// Response templates, one table per therapy mode plus the crisis set.
///
/// Keys within each table are emotion categories, topic tags, or "general".
/// Missing entries are tolerated -- every lookup path in the selector has a
/// textual fallback -- but an unreadable or malformed document is a
/// configuration error at startup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateTable {
    #[serde(default)]
    pub crisis_intervention: HashMap<String, String>,
    #[serde(default)]
    pub cognitive_behavioral: HashMap<String, String>,
    #[serde(default)]
    pub dialectical_behavior: HashMap<String, String>,
    #[serde(default)]
    pub empathetic_reflection: HashMap<String, String>,
}

impl TemplateTable {
    /// Parses a template table from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, EmohealError> {
        toml::from_str(content)
            .map_err(|e| EmohealError::Config(format!("invalid template table: {e}")))
    }

    /// Loads a template table from a TOML file on disk.
    pub fn load(path: &str) -> Result<Self, EmohealError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EmohealError::Config(format!("cannot read template table `{path}`: {e}"))
        })?;
        Self::from_toml_str(&content)
    }

    /// Returns the compiled-in default table.
    pub fn builtin() -> Result<Self, EmohealError> {
        Self::from_toml_str(BUILTIN_TEMPLATES)
    }
}
