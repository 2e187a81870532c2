// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the EmoHeal workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Sentinel stored as the bot response on a crisis-intercepted turn.
pub const CRISIS_SENTINEL: &str = "CRISIS_ALERT";

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Storage,
    Analysis,
}

/// Severity bucket produced by the crisis classifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// Recommended action attached to a risk assessment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskAction {
    NormalConversation,
    ContinuedSupport,
    IncreasedMonitoring,
    ImmediateIntervention,
}

/// Output of the crisis classifier for one turn.
///
/// Recomputed fresh per turn; only its fields are persisted, never the
/// assessment itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    /// Classifier confidence in `[0, 1]`.
    pub confidence: f64,
    /// Keywords that triggered the tier, in match order. Empty for the
    /// pattern-score and low tiers.
    pub triggered_keywords: Vec<String>,
    pub action: RiskAction,
    /// Fixed advisory text for the tier, if any.
    pub advisory: Option<String>,
}

/// VADER-style polarity scores for one message.
///
/// `compound` is in `[-1, 1]`; the three proportions are in `[0, 1]`.
/// All four are rounded to 3 decimals by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScores {
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// One detected emotion keyword hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionHit {
    /// Emotion category (e.g. "anxiety", "depression").
    pub category: String,
    /// The lexicon term that matched.
    pub term: String,
    /// Intensity in `[0, 1]`: 0.9 when preceded by an intensifier, else 0.5.
    pub intensity: f64,
}

/// Features extracted from one user message.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FeatureBundle {
    /// Sentiment scores; `None` on the degraded (analysis-failed) path.
    pub sentiment: Option<SentimentScores>,
    /// At most 2 hits, in configured category order.
    pub emotions: Vec<EmotionHit>,
    /// Topic tags in configured topic order; a message may carry several.
    pub topics: Vec<String>,
}

impl FeatureBundle {
    /// The fallback bundle substituted when feature extraction fails.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// One user message within a session's history.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    pub message: String,
    pub received_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            received_at: Utc::now(),
        }
    }
}

/// Persisted record of one processed turn. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    pub id: String,
    pub user_id: String,
    pub session_id: String,
    pub user_message: String,
    /// The reply sent to the user, or [`CRISIS_SENTINEL`] on crisis turns.
    pub bot_response: String,
    /// Sentiment snapshot; `None` for crisis and degraded turns.
    pub sentiment: Option<SentimentScores>,
    /// Detected emotion categories (not full hits).
    pub emotions: Vec<String>,
    pub topics: Vec<String>,
    pub risk_tier: RiskTier,
    pub risk_confidence: f64,
    /// RFC 3339 UTC timestamp.
    pub created_at: String,
}

/// Persisted crisis alert, written only for high-tier turns. The `resolved`
/// flag is mutated by an external operator workflow, not by this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisAlert {
    pub id: String,
    pub user_id: String,
    pub session_id: String,
    pub trigger_message: String,
    pub detected_keywords: Vec<String>,
    pub resolved: bool,
    /// RFC 3339 UTC timestamp.
    pub created_at: String,
}
