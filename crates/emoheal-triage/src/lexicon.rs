// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crisis keyword lexicon loaded from a TOML document.

use serde::Deserialize;

use emoheal_core::EmohealError;

/// Compiled-in default lexicon, used when no `triage.lexicon_path` is set.
const BUILTIN_LEXICON: &str = include_str!("../data/crisis_lexicon.toml");

/// Keyword tables consulted by the crisis classifier.
///
/// List order is significant: the first matching keyword in a list is the
/// one reported as triggered.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrisisLexicon {
    /// Keywords indicating immediate danger.
    pub high_risk: Vec<String>,
    /// Keywords indicating elevated distress.
    pub medium_risk: Vec<String>,
    /// Keywords indicating mild distress. Loaded for completeness of the
    /// document format; the tier decision uses the high/medium lists and
    /// the pattern words.
    #[serde(default)]
    pub low_risk: Vec<String>,
    /// Words counted by the conversation pattern score.
    pub negative_pattern_words: Vec<String>,
}

impl CrisisLexicon {
    /// Parses a lexicon from TOML text and checks it is usable.
    pub fn from_toml_str(content: &str) -> Result<Self, EmohealError> {
        let lexicon: CrisisLexicon = toml::from_str(content)
            .map_err(|e| EmohealError::Config(format!("invalid crisis lexicon: {e}")))?;
        lexicon.check()?;
        Ok(lexicon)
    }

    /// Loads a lexicon from a TOML file on disk.
    pub fn load(path: &str) -> Result<Self, EmohealError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EmohealError::Config(format!("cannot read crisis lexicon `{path}`: {e}"))
        })?;
        Self::from_toml_str(&content)
    }

    /// Returns the compiled-in default lexicon.
    pub fn builtin() -> Result<Self, EmohealError> {
        Self::from_toml_str(BUILTIN_LEXICON)
    }

    /// A lexicon with an empty high- or medium-risk list cannot triage.
    fn check(&self) -> Result<(), EmohealError> {
        if self.high_risk.is_empty() {
            return Err(EmohealError::Config(
                "crisis lexicon has no high_risk keywords".to_string(),
            ));
        }
        if self.medium_risk.is_empty() {
            return Err(EmohealError::Config(
                "crisis lexicon has no medium_risk keywords".to_string(),
            ));
        }
        Ok(())
    }
}
