// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `emoheal triage test` command implementation.
//!
//! Runs the crisis classifier over a fixed probe set so operators can
//! verify the keyword tables after editing a lexicon document.

use emoheal_config::EmohealConfig;
use emoheal_core::EmohealError;
use emoheal_triage::CrisisClassifier;

/// Probe messages spanning all three decision tiers.
const PROBES: &[&str] = &[
    "I want to kill myself",
    "I'm feeling sad",
    "Everything feels hopeless",
    "I feel anxious about work",
];

/// Classifies each probe with empty history and prints the assessment.
pub fn run_probe(config: &EmohealConfig) -> Result<(), EmohealError> {
    let classifier = CrisisClassifier::from_config(&config.triage)?;

    for message in PROBES {
        let assessment = classifier.assess(message, &[]);
        println!(
            "{message:<32} tier={:<6} confidence={:.2} action={}",
            assessment.tier.to_string(),
            assessment.confidence,
            assessment.action
        );
        if let Some(keyword) = assessment.triggered_keywords.first() {
            println!("{:32} triggered by \"{keyword}\"", "");
        }
    }

    Ok(())
}
