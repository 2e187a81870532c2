// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Three-tier crisis classification over a message and its session history.

use emoheal_core::{ConversationTurn, EmohealError, RiskAction, RiskAssessment, RiskTier};
use emoheal_config::model::TriageConfig;

use crate::lexicon::CrisisLexicon;

/// Advisory sent with a high-tier assessment.
const HIGH_ADVISORY: &str = "We detect you may be in immediate danger. Please reach out to emergency services: 988 (US) or your local crisis line.";

/// Advisory sent with a medium-tier keyword assessment.
const MEDIUM_ADVISORY: &str =
    "I sense you're going through something difficult. Let's talk about this.";

/// Advisory sent when the conversation pattern score crosses the threshold.
const PATTERN_ADVISORY: &str =
    "I notice a pattern of difficult emotions. How can I help you right now?";

/// Pattern score above which the conversation itself raises the tier.
const PATTERN_THRESHOLD: f64 = 0.6;

/// Number of most recent turns examined by the pattern score.
const PATTERN_WINDOW: usize = 5;

/// Minimum history length before the pattern score applies.
const PATTERN_MIN_TURNS: usize = 3;

/// Assigns a risk tier to each inbound message.
///
/// Pure over its inputs; the keyword tables are fixed at construction and
/// shared read-only across sessions.
pub struct CrisisClassifier {
    lexicon: CrisisLexicon,
}

impl CrisisClassifier {
    /// Builds a classifier over the given lexicon.
    pub fn new(lexicon: CrisisLexicon) -> Self {
        Self { lexicon }
    }

    /// Builds a classifier from configuration: an explicit lexicon document
    /// if `triage.lexicon_path` is set, else the compiled-in default.
    ///
    /// A missing or malformed document is fatal here; without its keyword
    /// tables the component cannot classify at all.
    pub fn from_config(config: &TriageConfig) -> Result<Self, EmohealError> {
        let lexicon = match &config.lexicon_path {
            Some(path) => CrisisLexicon::load(path)?,
            None => CrisisLexicon::builtin()?,
        };
        Ok(Self::new(lexicon))
    }

    /// Assesses one message given the session history as it exists at this
    /// moment (the current turn already appended).
    ///
    /// Priority order, first match wins:
    /// 1. high-risk keyword  -> high, 0.95, IMMEDIATE_INTERVENTION
    /// 2. medium-risk keyword -> medium, 0.7, INCREASED_MONITORING
    /// 3. pattern score > 0.6 -> medium, score, CONTINUED_SUPPORT
    /// 4. otherwise           -> low, 0.1, NORMAL_CONVERSATION
    pub fn assess(&self, message: &str, history: &[ConversationTurn]) -> RiskAssessment {
        let lowered = message.to_lowercase();

        for keyword in &self.lexicon.high_risk {
            if lowered.contains(keyword.as_str()) {
                return RiskAssessment {
                    tier: RiskTier::High,
                    confidence: 0.95,
                    triggered_keywords: vec![keyword.clone()],
                    action: RiskAction::ImmediateIntervention,
                    advisory: Some(HIGH_ADVISORY.to_string()),
                };
            }
        }

        for keyword in &self.lexicon.medium_risk {
            if lowered.contains(keyword.as_str()) {
                return RiskAssessment {
                    tier: RiskTier::Medium,
                    confidence: 0.7,
                    triggered_keywords: vec![keyword.clone()],
                    action: RiskAction::IncreasedMonitoring,
                    advisory: Some(MEDIUM_ADVISORY.to_string()),
                };
            }
        }

        let score = self.pattern_score(history);
        if score > PATTERN_THRESHOLD {
            return RiskAssessment {
                tier: RiskTier::Medium,
                confidence: score,
                triggered_keywords: Vec::new(),
                action: RiskAction::ContinuedSupport,
                advisory: Some(PATTERN_ADVISORY.to_string()),
            };
        }

        RiskAssessment {
            tier: RiskTier::Low,
            confidence: 0.1,
            triggered_keywords: Vec::new(),
            action: RiskAction::NormalConversation,
            advisory: None,
        }
    }

    /// Scores the recent conversation for accumulating negative language.
    ///
    /// Histories shorter than 3 turns score 0. Over the last 5 turns, each
    /// (turn, word) presence adds 0.1, capped at 1.0 -- a word occurring
    /// twice in one turn counts once.
    fn pattern_score(&self, history: &[ConversationTurn]) -> f64 {
        if history.len() < PATTERN_MIN_TURNS {
            return 0.0;
        }

        let start = history.len().saturating_sub(PATTERN_WINDOW);
        let mut hits = 0u32;
        for turn in &history[start..] {
            let text = turn.message.to_lowercase();
            for word in &self.lexicon.negative_pattern_words {
                if text.contains(word.as_str()) {
                    hits += 1;
                }
            }
        }

        (f64::from(hits) * 0.1).min(1.0)
    }
}
