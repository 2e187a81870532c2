// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Valence-lexicon sentiment scorer.
//!
//! A VADER-style polarity model: each lexicon word carries a signed valence,
//! boosters sharpen the word they precede, negations flip it, and the summed
//! valence is squashed into a `[-1, 1]` compound score. Runs in a few
//! microseconds per message with no model files or network calls.

use emoheal_core::{EmohealError, SentimentAnalyzer, SentimentScores};

/// (word, valence). Negative valences first, roughly ordered by severity.
const VALENCE_TABLE: &[(&str, f64)] = &[
    ("worthless", -2.7),
    ("hate", -2.7),
    ("miserable", -2.6),
    ("depressed", -2.5),
    ("hopeless", -2.5),
    ("angry", -2.3),
    ("terrible", -2.1),
    ("sad", -2.1),
    ("awful", -2.0),
    ("panic", -2.0),
    ("fear", -2.0),
    ("frustrated", -2.0),
    ("anxious", -1.9),
    ("scared", -1.9),
    ("afraid", -1.9),
    ("lonely", -1.9),
    ("pain", -1.9),
    ("hurt", -1.9),
    ("cry", -1.9),
    ("worried", -1.8),
    ("stressed", -1.8),
    ("overwhelmed", -1.7),
    ("nervous", -1.6),
    ("exhausted", -1.6),
    ("empty", -1.4),
    ("tired", -1.2),
    ("alone", -1.0),
    ("love", 3.2),
    ("great", 3.1),
    ("amazing", 2.8),
    ("joy", 2.8),
    ("happy", 2.7),
    ("wonderful", 2.7),
    ("grateful", 2.3),
    ("excited", 2.2),
    ("proud", 2.2),
    ("enjoy", 2.2),
    ("peaceful", 2.0),
    ("hope", 1.9),
    ("good", 1.9),
    ("better", 1.9),
    ("relaxed", 1.8),
    ("calm", 1.3),
    ("okay", 0.9),
    ("fine", 0.8),
];

/// Words that sharpen the valence of the word they precede.
const BOOSTERS: &[&str] = &[
    "very",
    "so",
    "extremely",
    "really",
    "incredibly",
    "absolutely",
];

/// Words that flip the valence of the word they precede.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "don't", "dont", "can't", "cant", "won't", "wont", "isn't", "isnt",
    "wasn't", "wasnt", "didn't", "didnt", "hardly", "barely",
];

/// Booster magnitude added to the absolute valence (VADER's B_INCR).
const BOOST: f64 = 0.293;

/// Negation damping factor (VADER's N_SCALAR).
const NEGATION_SCALAR: f64 = -0.74;

/// Normalization constant for the compound score.
const ALPHA: f64 = 15.0;

/// The bundled [`SentimentAnalyzer`] implementation.
#[derive(Debug, Default, Clone)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentAnalyzer for LexiconSentiment {
    fn scores(&self, text: &str) -> Result<SentimentScores, EmohealError> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
            .filter(|t| !t.is_empty())
            .collect();

        let mut sum = 0.0;
        let mut pos_mass = 0.0;
        let mut neg_mass = 0.0;
        let mut neutral_count = 0.0;

        for (i, token) in tokens.iter().enumerate() {
            if BOOSTERS.contains(token) || NEGATIONS.contains(token) {
                // Modifiers are absorbed into the word they precede.
                continue;
            }

            let Some(base) = valence_of(token) else {
                neutral_count += 1.0;
                continue;
            };

            let mut valence = base;
            if i > 0 && BOOSTERS.contains(&tokens[i - 1]) {
                valence += BOOST.copysign(valence);
            }
            // A negation directly before the word, or before its booster.
            let negated = (i > 0 && NEGATIONS.contains(&tokens[i - 1]))
                || (i > 1
                    && BOOSTERS.contains(&tokens[i - 1])
                    && NEGATIONS.contains(&tokens[i - 2]));
            if negated {
                valence *= NEGATION_SCALAR;
            }

            sum += valence;
            if valence > 0.0 {
                pos_mass += valence;
            } else {
                neg_mass += -valence;
            }
        }

        let total = pos_mass + neg_mass + neutral_count;
        let (positive, negative, neutral) = if total > 0.0 {
            (pos_mass / total, neg_mass / total, neutral_count / total)
        } else {
            (0.0, 0.0, 0.0)
        };

        let compound = sum / (sum * sum + ALPHA).sqrt();

        Ok(SentimentScores {
            compound: round3(compound),
            positive: round3(positive),
            negative: round3(negative),
            neutral: round3(neutral),
        })
    }
}

fn valence_of(token: &str) -> Option<f64> {
    VALENCE_TABLE
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, v)| *v)
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
