// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the EmoHeal support chat backend.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the EmoHeal workspace. The storage backend
//! and the sentiment collaborator implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::EmohealError;
pub use types::{
    AdapterType, ConversationTurn, CrisisAlert, EmotionHit, ExchangeRecord, FeatureBundle,
    HealthStatus, RiskAction, RiskAssessment, RiskTier, SentimentScores, CRISIS_SENTINEL,
};

// Re-export adapter traits at crate root.
pub use traits::{PluginAdapter, SentimentAnalyzer, StorageAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emoheal_error_has_all_variants() {
        let _config = EmohealError::Config("test".into());
        let _storage = EmohealError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _channel = EmohealError::Channel {
            message: "test".into(),
            source: None,
        };
        let _analysis = EmohealError::Analysis {
            message: "test".into(),
            source: None,
        };
        let _internal = EmohealError::Internal("test".into());
    }

    #[test]
    fn risk_tier_round_trips_through_strings() {
        use std::str::FromStr;

        for tier in [RiskTier::Low, RiskTier::Medium, RiskTier::High] {
            let s = tier.to_string();
            let parsed = RiskTier::from_str(&s).expect("should parse back");
            assert_eq!(tier, parsed);
        }
        assert_eq!(RiskTier::High.to_string(), "high");
    }

    #[test]
    fn risk_action_serializes_screaming_snake() {
        let json = serde_json::to_string(&RiskAction::ImmediateIntervention).unwrap();
        assert_eq!(json, "\"IMMEDIATE_INTERVENTION\"");
        let json = serde_json::to_string(&RiskAction::NormalConversation).unwrap();
        assert_eq!(json, "\"NORMAL_CONVERSATION\"");
    }

    #[test]
    fn empty_feature_bundle_has_no_features() {
        let bundle = FeatureBundle::empty();
        assert!(bundle.sentiment.is_none());
        assert!(bundle.emotions.is_empty());
        assert!(bundle.topics.is_empty());
    }

    #[test]
    fn health_status_variants() {
        let healthy = HealthStatus::Healthy;
        let degraded = HealthStatus::Degraded("slow".into());
        let unhealthy = HealthStatus::Unhealthy("down".into());

        assert_eq!(healthy, HealthStatus::Healthy);
        assert_ne!(degraded, healthy);
        assert_ne!(unhealthy, healthy);
    }
}
