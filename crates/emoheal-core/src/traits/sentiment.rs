// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sentiment analysis collaborator seam.

use crate::error::EmohealError;
use crate::types::SentimentScores;

/// Collaborator that scores the polarity of a message.
///
/// The feature extractor consumes this as an opaque primitive. A failure
/// here is fatal for the current call only: the session loop substitutes
/// an empty feature bundle and a generic acknowledgment reply.
pub trait SentimentAnalyzer: Send + Sync {
    /// Scores the given text, returning compound/positive/negative/neutral
    /// values rounded to 3 decimals.
    fn scores(&self, text: &str) -> Result<SentimentScores, EmohealError>;
}
