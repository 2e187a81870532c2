// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-to-client event payloads.
//!
//! Wire format (JSON, tagged by `type`):
//! ```json
//! {"type": "bot_response", "message": "...", "crisis_level": "low",
//!  "sentiment": {...}, "emotions": [...], "topics": [...], "timestamp": "..."}
//! {"type": "crisis_alert", "message": "...", "level": "high",
//!  "resources": {"hotline": "988", ...}, "timestamp": "..."}
//! ```

use serde::Serialize;

use emoheal_core::{EmotionHit, RiskTier, SentimentScores};

/// Fixed resource bundle attached to every crisis alert.
#[derive(Debug, Clone, Serialize)]
pub struct CrisisResources {
    pub hotline: &'static str,
    pub textline: &'static str,
    pub emergency: &'static str,
}

impl Default for CrisisResources {
    fn default() -> Self {
        Self {
            hotline: "988",
            textline: "Text HOME to 741741",
            emergency: "911",
        }
    }
}

/// One message from the server to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A normal reply, including the welcome message (which carries no
    /// analysis fields).
    BotResponse {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        crisis_level: Option<RiskTier>,
        #[serde(skip_serializing_if = "Option::is_none")]
        sentiment: Option<SentimentScores>,
        #[serde(skip_serializing_if = "Option::is_none")]
        emotions: Option<Vec<EmotionHit>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        topics: Option<Vec<String>>,
        timestamp: String,
    },
    /// Crisis interception: the advisory text plus hotline resources.
    CrisisAlert {
        message: String,
        level: RiskTier,
        resources: CrisisResources,
        timestamp: String,
    },
}

impl ServerEvent {
    /// The fixed first message on every connection.
    pub fn welcome(text: &str) -> Self {
        ServerEvent::BotResponse {
            message: text.to_string(),
            crisis_level: None,
            sentiment: None,
            emotions: None,
            topics: None,
            timestamp: now_rfc3339(),
        }
    }
}

/// RFC 3339 UTC timestamp with millisecond precision.
pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_serializes_without_analysis_fields() {
        let event = ServerEvent::welcome("Hello!");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "bot_response");
        assert_eq!(json["message"], "Hello!");
        assert!(json.get("crisis_level").is_none());
        assert!(json.get("sentiment").is_none());
        assert!(json.get("emotions").is_none());
    }

    #[test]
    fn crisis_alert_serializes_with_resources() {
        let event = ServerEvent::CrisisAlert {
            message: "advisory".to_string(),
            level: RiskTier::High,
            resources: CrisisResources::default(),
            timestamp: now_rfc3339(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "crisis_alert");
        assert_eq!(json["level"], "high");
        assert_eq!(json["resources"]["hotline"], "988");
        assert_eq!(json["resources"]["textline"], "Text HOME to 741741");
        assert_eq!(json["resources"]["emergency"], "911");
    }

    #[test]
    fn bot_response_carries_crisis_level_when_set() {
        let event = ServerEvent::BotResponse {
            message: "reply".to_string(),
            crisis_level: Some(RiskTier::Medium),
            sentiment: None,
            emotions: Some(vec![]),
            topics: Some(vec!["work".to_string()]),
            timestamp: now_rfc3339(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["crisis_level"], "medium");
        assert_eq!(json["topics"][0], "work");
    }
}
