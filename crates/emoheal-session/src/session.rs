// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-connection FSM that manages the lifecycle of a single conversation.
//!
//! Each session goes through states:
//! Connecting -> WelcomeSent -> AwaitingMessage <-> Processing -> Closed.
//!
//! Per turn, the session sequences: append to history, crisis triage,
//! crisis short-circuit or extract/select, persist, reply. Persistence of
//! a normal turn must succeed before the reply is returned; on the crisis
//! path the reply is never suppressed by a failed write.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use emoheal_core::{
    ConversationTurn, CrisisAlert, EmohealError, ExchangeRecord, RiskTier, StorageAdapter,
    CRISIS_SENTINEL,
};

use crate::engine::TherapyEngine;
use crate::events::{now_rfc3339, CrisisResources, ServerEvent};

/// Reply used when feature extraction fails for a turn.
fn degraded_acknowledgment(message: &str) -> String {
    format!("I hear you saying: '{message}'. Tell me more about how you're feeling.")
}

/// States in the session FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Socket accepted, welcome not yet sent.
    Connecting,
    /// Welcome delivered, transitioning to the message loop.
    WelcomeSent,
    /// Waiting for the next inbound message.
    AwaitingMessage,
    /// One turn being classified, extracted, selected, and persisted.
    Processing,
    /// Disconnected; in-memory history released.
    Closed,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Connecting => write!(f, "connecting"),
            SessionState::WelcomeSent => write!(f, "welcome_sent"),
            SessionState::AwaitingMessage => write!(f, "awaiting_message"),
            SessionState::Processing => write!(f, "processing"),
            SessionState::Closed => write!(f, "closed"),
        }
    }
}

/// Manages the state and message processing for a single conversation.
pub struct ChatSession {
    user_id: String,
    session_id: String,
    state: SessionState,
    history: Vec<ConversationTurn>,
    engine: Arc<TherapyEngine>,
    storage: Arc<dyn StorageAdapter + Send + Sync>,
}

impl ChatSession {
    /// Creates a session in the Connecting state.
    pub fn new(
        user_id: impl Into<String>,
        engine: Arc<TherapyEngine>,
        storage: Arc<dyn StorageAdapter + Send + Sync>,
    ) -> Self {
        let user_id = user_id.into();
        let session_id = uuid::Uuid::new_v4().to_string();
        info!(
            user_id = user_id.as_str(),
            session_id = session_id.as_str(),
            "session created"
        );
        Self {
            user_id,
            session_id,
            state: SessionState::Connecting,
            history: Vec::new(),
            engine,
            storage,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Emits the fixed welcome message and enters the message loop.
    pub fn open(&mut self, welcome_text: &str) -> ServerEvent {
        self.state = SessionState::WelcomeSent;
        let event = ServerEvent::welcome(welcome_text);
        self.state = SessionState::AwaitingMessage;
        event
    }

    /// Processes one inbound message.
    ///
    /// Returns `Ok(None)` for empty messages (ignored, loop continues).
    /// Returns `Err` only when a normal-path storage write fails; the
    /// caller logs the error and closes the channel.
    pub async fn process_turn(
        &mut self,
        raw: &str,
    ) -> Result<Option<ServerEvent>, EmohealError> {
        let text = raw.trim();
        if text.is_empty() {
            return Ok(None);
        }

        self.state = SessionState::Processing;

        // 1. Append the turn; the classifier sees history as of this moment.
        self.history.push(ConversationTurn::new(text));

        // 2. Crisis triage.
        let assessment = self.engine.classifier.assess(text, &self.history);
        debug!(
            session_id = self.session_id.as_str(),
            tier = %assessment.tier,
            confidence = assessment.confidence,
            "turn assessed"
        );

        // 3. High tier: intercept before any feature extraction.
        if assessment.tier == RiskTier::High {
            let event = self.intercept_crisis(text, &assessment).await;
            self.state = SessionState::AwaitingMessage;
            return Ok(Some(event));
        }

        // 4. Feature extraction, degrading to an empty bundle on failure.
        let features = match self.engine.extractor.extract(text) {
            Ok(bundle) => Some(bundle),
            Err(e) => {
                warn!(
                    session_id = self.session_id.as_str(),
                    error = %e,
                    "feature extraction failed, degrading turn"
                );
                None
            }
        };

        let (reply, sentiment, emotions, topics) = match &features {
            Some(bundle) => (
                self.engine
                    .selector
                    .select(bundle, assessment.tier, &self.history),
                bundle.sentiment,
                Some(bundle.emotions.clone()),
                Some(bundle.topics.clone()),
            ),
            None => (degraded_acknowledgment(text), None, None, None),
        };

        // 5. Persist before replying so the stored record matches what the
        //    user is told. A failure here propagates and closes the channel.
        let record = ExchangeRecord {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: self.user_id.clone(),
            session_id: self.session_id.clone(),
            user_message: text.to_string(),
            bot_response: reply.clone(),
            sentiment,
            emotions: emotions
                .as_ref()
                .map(|hits| hits.iter().map(|h| h.category.clone()).collect())
                .unwrap_or_default(),
            topics: topics.clone().unwrap_or_default(),
            risk_tier: assessment.tier,
            risk_confidence: assessment.confidence,
            created_at: now_rfc3339(),
        };
        self.storage.insert_exchange(&record).await?;

        info!(
            user_id = self.user_id.as_str(),
            session_id = self.session_id.as_str(),
            tier = %assessment.tier,
            "turn processed"
        );

        self.state = SessionState::AwaitingMessage;
        Ok(Some(ServerEvent::BotResponse {
            message: reply,
            crisis_level: Some(assessment.tier),
            sentiment,
            emotions,
            topics,
            timestamp: now_rfc3339(),
        }))
    }

    /// Handles a high-tier turn: persists the alert and the sentinel
    /// exchange, then builds the crisis event. Persistence failures are
    /// logged but never suppress the advisory reply.
    async fn intercept_crisis(
        &self,
        text: &str,
        assessment: &emoheal_core::RiskAssessment,
    ) -> ServerEvent {
        let advisory = assessment
            .advisory
            .clone()
            .unwrap_or_else(|| "Please reach out for help immediately.".to_string());

        let alert = CrisisAlert {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: self.user_id.clone(),
            session_id: self.session_id.clone(),
            trigger_message: text.to_string(),
            detected_keywords: assessment.triggered_keywords.clone(),
            resolved: false,
            created_at: now_rfc3339(),
        };
        if let Err(e) = self.storage.insert_alert(&alert).await {
            error!(
                session_id = self.session_id.as_str(),
                error = %e,
                "failed to persist crisis alert"
            );
        }

        let record = ExchangeRecord {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: self.user_id.clone(),
            session_id: self.session_id.clone(),
            user_message: text.to_string(),
            bot_response: CRISIS_SENTINEL.to_string(),
            sentiment: None,
            emotions: Vec::new(),
            topics: Vec::new(),
            risk_tier: assessment.tier,
            risk_confidence: assessment.confidence,
            created_at: now_rfc3339(),
        };
        if let Err(e) = self.storage.insert_exchange(&record).await {
            error!(
                session_id = self.session_id.as_str(),
                error = %e,
                "failed to persist crisis exchange record"
            );
        }

        warn!(
            user_id = self.user_id.as_str(),
            session_id = self.session_id.as_str(),
            "crisis alert raised"
        );

        ServerEvent::CrisisAlert {
            message: advisory,
            level: assessment.tier,
            resources: CrisisResources::default(),
            timestamp: now_rfc3339(),
        }
    }

    /// Disconnection from any state releases the in-memory history;
    /// persisted records remain in storage.
    pub fn close(&mut self) {
        self.state = SessionState::Closed;
        self.history.clear();
        info!(
            user_id = self.user_id.as_str(),
            session_id = self.session_id.as_str(),
            "session closed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_state_display() {
        assert_eq!(SessionState::Connecting.to_string(), "connecting");
        assert_eq!(SessionState::WelcomeSent.to_string(), "welcome_sent");
        assert_eq!(SessionState::AwaitingMessage.to_string(), "awaiting_message");
        assert_eq!(SessionState::Processing.to_string(), "processing");
        assert_eq!(SessionState::Closed.to_string(), "closed");
    }

    #[test]
    fn degraded_acknowledgment_echoes_message() {
        let reply = degraded_acknowledgment("rough week");
        assert_eq!(
            reply,
            "I hear you saying: 'rough week'. Tell me more about how you're feeling."
        );
    }
}
