// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversational feature extraction for the EmoHeal support chat backend.
//!
//! The [`FeatureExtractor`] turns one user message into a
//! [`FeatureBundle`](emoheal_core::FeatureBundle): polarity scores from the
//! [`SentimentAnalyzer`](emoheal_core::SentimentAnalyzer) collaborator,
//! emotion keyword hits (capped at 2, configured category order), and topic
//! tags. [`LexiconSentiment`] is the bundled analyzer implementation.

pub mod extractor;
pub mod sentiment;

pub use extractor::FeatureExtractor;
pub use sentiment::LexiconSentiment;
