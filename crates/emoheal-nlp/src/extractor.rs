// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Emotion-hit and topic-tag extraction over one user message.

use std::sync::Arc;

use emoheal_core::{EmohealError, EmotionHit, FeatureBundle, SentimentAnalyzer};

/// (category, terms). Category order decides which hits survive the cap.
const EMOTION_TABLE: &[(&str, &[&str])] = &[
    (
        "depression",
        &["sad", "empty", "hopeless", "worthless", "depressed", "down", "blue"],
    ),
    (
        "anxiety",
        &["worried", "anxious", "nervous", "scared", "panic", "fear", "afraid"],
    ),
    (
        "stress",
        &["stressed", "overwhelmed", "pressure", "tense", "burden", "exhausted"],
    ),
    (
        "anger",
        &["angry", "furious", "irritated", "mad", "frustrated", "rage"],
    ),
    (
        "loneliness",
        &["alone", "lonely", "isolated", "abandoned", "left out", "no one cares"],
    ),
];

/// (topic, keywords). Topic order is the tag order in the bundle.
const TOPIC_TABLE: &[(&str, &[&str])] = &[
    (
        "relationships",
        &["friend", "family", "partner", "love", "break up", "relationship"],
    ),
    ("work", &["job", "work", "career", "boss", "colleague", "office"]),
    ("health", &["health", "sick", "pain", "doctor", "hospital", "ill"]),
    ("sleep", &["sleep", "insomnia", "tired", "rest", "wake up"]),
    ("school", &["school", "exam", "test", "grade", "study", "homework"]),
];

/// Words that raise a hit's intensity when immediately preceding the term.
const INTENSIFIERS: &[&str] = &["very", "so", "extremely", "really", "incredibly", "absolutely"];

/// At most this many emotion categories are kept per message, in
/// EMOTION_TABLE order. Category order, not intensity, decides survival.
const MAX_EMOTION_HITS: usize = 2;

const BASE_INTENSITY: f64 = 0.5;
const INTENSIFIED_INTENSITY: f64 = 0.9;

/// Extracts a [`FeatureBundle`] from one user message.
///
/// Sentiment scoring is delegated to the injected [`SentimentAnalyzer`];
/// its failure is fatal for this call only and the session loop degrades
/// to [`FeatureBundle::empty`].
pub struct FeatureExtractor {
    analyzer: Arc<dyn SentimentAnalyzer>,
}

impl FeatureExtractor {
    pub fn new(analyzer: Arc<dyn SentimentAnalyzer>) -> Self {
        Self { analyzer }
    }

    pub fn extract(&self, message: &str) -> Result<FeatureBundle, EmohealError> {
        let sentiment = self.analyzer.scores(message)?;
        let lowered = message.to_lowercase();

        Ok(FeatureBundle {
            sentiment: Some(sentiment),
            emotions: extract_emotions(&lowered),
            topics: extract_topics(&lowered),
        })
    }
}

/// First keyword match per category, first two categories kept.
fn extract_emotions(lowered: &str) -> Vec<EmotionHit> {
    let mut hits = Vec::new();

    for (category, terms) in EMOTION_TABLE {
        for term in *terms {
            if lowered.contains(term) {
                hits.push(EmotionHit {
                    category: (*category).to_string(),
                    term: (*term).to_string(),
                    intensity: intensity_of(term, lowered),
                });
                break; // first match per category
            }
        }
        if hits.len() == MAX_EMOTION_HITS {
            break;
        }
    }

    hits
}

/// A topic is tagged when any of its keywords appears in the message.
fn extract_topics(lowered: &str) -> Vec<String> {
    TOPIC_TABLE
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(topic, _)| (*topic).to_string())
        .collect()
}

/// 0.9 when an intensifier immediately precedes the term (or its plural),
/// else 0.5.
fn intensity_of(term: &str, lowered: &str) -> f64 {
    for intensifier in INTENSIFIERS {
        if lowered.contains(&format!("{intensifier} {term}"))
            || lowered.contains(&format!("{intensifier} {term}s"))
        {
            return INTENSIFIED_INTENSITY;
        }
    }
    BASE_INTENSITY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::LexiconSentiment;

    fn extractor() -> FeatureExtractor {
        FeatureExtractor::new(Arc::new(LexiconSentiment::new()))
    }

    struct FailingAnalyzer;

    impl SentimentAnalyzer for FailingAnalyzer {
        fn scores(
            &self,
            _text: &str,
        ) -> Result<emoheal_core::SentimentScores, EmohealError> {
            Err(EmohealError::Analysis {
                message: "scorer offline".to_string(),
                source: None,
            })
        }
    }

    #[test]
    fn intensified_anxiety_scores_high_intensity() {
        let bundle = extractor().extract("I feel very anxious about work").unwrap();
        assert_eq!(bundle.emotions.len(), 1);
        let hit = &bundle.emotions[0];
        assert_eq!(hit.category, "anxiety");
        assert_eq!(hit.term, "anxious");
        assert_eq!(hit.intensity, 0.9);
        assert_eq!(bundle.topics, vec!["work"]);
        assert!(bundle.sentiment.is_some());
    }

    #[test]
    fn plain_mention_scores_base_intensity() {
        let bundle = extractor().extract("I've been worried lately").unwrap();
        assert_eq!(bundle.emotions[0].category, "anxiety");
        assert_eq!(bundle.emotions[0].intensity, 0.5);
    }

    #[test]
    fn cap_keeps_first_two_categories_in_configured_order() {
        // sad (depression), anxious (anxiety), stressed (stress) all match;
        // only the first two configured categories survive.
        let bundle = extractor()
            .extract("I'm sad, anxious and stressed all at once")
            .unwrap();
        let categories: Vec<&str> =
            bundle.emotions.iter().map(|h| h.category.as_str()).collect();
        assert_eq!(categories, vec!["depression", "anxiety"]);
    }

    #[test]
    fn first_term_per_category_wins() {
        // Both "worried" and "scared" are anxiety terms; the hit records
        // the first term in the configured list.
        let bundle = extractor().extract("I'm scared and worried").unwrap();
        assert_eq!(bundle.emotions.len(), 1);
        assert_eq!(bundle.emotions[0].term, "worried");
    }

    #[test]
    fn intensifier_elsewhere_in_message_does_not_count() {
        // "really" is present but does not precede the matched term.
        let bundle = extractor().extract("really, I am worried").unwrap();
        assert_eq!(bundle.emotions[0].term, "worried");
        assert_eq!(bundle.emotions[0].intensity, 0.5);
    }

    #[test]
    fn message_may_carry_multiple_topics() {
        let bundle = extractor()
            .extract("my boss and my family are both on my case")
            .unwrap();
        assert_eq!(bundle.topics, vec!["relationships", "work"]);
    }

    #[test]
    fn no_features_in_neutral_message() {
        let bundle = extractor().extract("the weather turned cold").unwrap();
        assert!(bundle.emotions.is_empty());
        assert!(bundle.topics.is_empty());
    }

    #[test]
    fn analyzer_failure_propagates() {
        let extractor = FeatureExtractor::new(Arc::new(FailingAnalyzer));
        let err = extractor.extract("anything").unwrap_err();
        assert!(matches!(err, EmohealError::Analysis { .. }));
    }
}
