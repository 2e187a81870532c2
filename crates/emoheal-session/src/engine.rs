// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only bundle of the three turn-processing components.

use std::sync::Arc;

use emoheal_config::EmohealConfig;
use emoheal_core::EmohealError;
use emoheal_nlp::{FeatureExtractor, LexiconSentiment};
use emoheal_responder::{ResponseSelector, ThreadRngSource};
use emoheal_triage::CrisisClassifier;

/// Classifier, extractor, and selector, constructed once at startup and
/// shared read-only across all sessions (no locking required).
pub struct TherapyEngine {
    pub classifier: CrisisClassifier,
    pub extractor: FeatureExtractor,
    pub selector: ResponseSelector,
}

impl std::fmt::Debug for TherapyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TherapyEngine").finish_non_exhaustive()
    }
}

impl TherapyEngine {
    pub fn new(
        classifier: CrisisClassifier,
        extractor: FeatureExtractor,
        selector: ResponseSelector,
    ) -> Self {
        Self {
            classifier,
            extractor,
            selector,
        }
    }

    /// Builds the engine from configuration.
    ///
    /// Fails with a configuration error when a keyword or template document
    /// cannot be loaded -- the process must refuse to mark the capability
    /// ready rather than serve without its tables.
    pub fn from_config(config: &EmohealConfig) -> Result<Self, EmohealError> {
        let classifier = CrisisClassifier::from_config(&config.triage)?;
        let extractor = FeatureExtractor::new(Arc::new(LexiconSentiment::new()));
        let selector =
            ResponseSelector::from_config(&config.responder, Box::new(ThreadRngSource))?;
        Ok(Self::new(classifier, extractor, selector))
    }
}
