// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Therapy-mode selection and template lookup for one reply.

use emoheal_core::{ConversationTurn, EmohealError, FeatureBundle, RiskTier};
use emoheal_config::model::ResponderConfig;
use strum::Display;

use crate::random::RandomSource;
use crate::templates::TemplateTable;

/// Fallback when the crisis table has no `immediate_support` entry.
const HIGH_FALLBACK: &str = "Please reach out for help immediately.";

/// Fallback when the crisis table has no `high_risk_keywords` entry.
const MEDIUM_FALLBACK: &str = "I want to help you through this difficult time.";

/// Final default when no template key in the lookup chain resolves.
const DEFAULT_PROMPT: &str = "Tell me more about how you're feeling.";

/// Character budget for the historical-reference snippet.
const SNIPPET_CHARS: usize = 50;

/// Template family consulted for a non-crisis reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TherapyMode {
    CognitiveBehavioral,
    DialecticalBehavior,
    EmpatheticReflection,
}

/// Selects one reply string per turn.
///
/// Never errors: every lookup path ends in a textual fallback.
pub struct ResponseSelector {
    templates: TemplateTable,
    random: Box<dyn RandomSource>,
}

impl ResponseSelector {
    pub fn new(templates: TemplateTable, random: Box<dyn RandomSource>) -> Self {
        Self { templates, random }
    }

    /// Builds a selector from configuration: an explicit template document
    /// if `responder.templates_path` is set, else the compiled-in default.
    pub fn from_config(
        config: &ResponderConfig,
        random: Box<dyn RandomSource>,
    ) -> Result<Self, EmohealError> {
        let templates = match &config.templates_path {
            Some(path) => TemplateTable::load(path)?,
            None => TemplateTable::builtin()?,
        };
        Ok(Self::new(templates, random))
    }

    /// Produces the reply for one turn.
    pub fn select(
        &self,
        features: &FeatureBundle,
        tier: RiskTier,
        history: &[ConversationTurn],
    ) -> String {
        match tier {
            RiskTier::High => {
                return self
                    .templates
                    .crisis_intervention
                    .get("immediate_support")
                    .cloned()
                    .unwrap_or_else(|| HIGH_FALLBACK.to_string());
            }
            RiskTier::Medium => {
                return self
                    .templates
                    .crisis_intervention
                    .get("high_risk_keywords")
                    .cloned()
                    .unwrap_or_else(|| MEDIUM_FALLBACK.to_string());
            }
            RiskTier::Low => {}
        }

        let mode = self.mode_for(features);
        let template = self.template_for(mode, features);
        self.personalize(template, features, history)
    }

    /// Chooses the therapy mode for a non-crisis turn.
    fn mode_for(&self, features: &FeatureBundle) -> TherapyMode {
        if let Some(sentiment) = &features.sentiment {
            if sentiment.negative > 0.5 && sentiment.compound < -0.3 {
                return TherapyMode::CognitiveBehavioral;
            }
        }
        if features.emotions.iter().any(|h| h.category == "anxiety") {
            return TherapyMode::DialecticalBehavior;
        }
        TherapyMode::EmpatheticReflection
    }

    /// Resolves the template via an explicit ordered lookup chain:
    /// first emotion category -> first topic -> "general" -> literal default.
    fn template_for(&self, mode: TherapyMode, features: &FeatureBundle) -> String {
        let table = match mode {
            TherapyMode::CognitiveBehavioral => &self.templates.cognitive_behavioral,
            TherapyMode::DialecticalBehavior => &self.templates.dialectical_behavior,
            TherapyMode::EmpatheticReflection => &self.templates.empathetic_reflection,
        };

        let mut attempts: Vec<&str> = Vec::with_capacity(3);
        if let Some(hit) = features.emotions.first() {
            attempts.push(hit.category.as_str());
        }
        if let Some(topic) = features.topics.first() {
            attempts.push(topic.as_str());
        }
        attempts.push("general");

        for key in attempts {
            if let Some(template) = table.get(key) {
                return template.clone();
            }
        }
        DEFAULT_PROMPT.to_string()
    }

    /// Prepends the emotion reflection and, when there is an earlier turn to
    /// reference, one randomly chosen historical-reference phrase.
    fn personalize(
        &self,
        template: String,
        features: &FeatureBundle,
        history: &[ConversationTurn],
    ) -> String {
        let mut response = template;

        if let Some(hit) = features.emotions.first() {
            response = format!("I hear you're feeling {} right now. {response}", hit.category);
        }

        if history.len() > 1 {
            let previous = &history[history.len() - 2].message;
            let snippet = truncate_chars(previous, SNIPPET_CHARS);
            let prefix = match self.random.choose(3) {
                0 => Some(format!("Building on what you said about '{snippet}'")),
                1 => Some(format!("Regarding your earlier mention of {snippet}")),
                _ => None,
            };
            if let Some(prefix) = prefix {
                response = format!("{prefix} {response}");
            }
        }

        response
    }
}

/// First `max` characters plus an ellipsis.
fn truncate_chars(s: &str, max: usize) -> String {
    let mut snippet: String = s.chars().take(max).collect();
    snippet.push_str("...");
    snippet
}
