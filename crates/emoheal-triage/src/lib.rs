// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crisis triage for the EmoHeal support chat backend.
//!
//! The [`CrisisClassifier`] assigns each inbound message a risk tier in
//! strict priority order: high-risk keyword, medium-risk keyword,
//! conversation pattern score, low. The classifier is a pure function over
//! the message and the session history; its keyword tables come from a
//! [`CrisisLexicon`] document loaded once at startup.

pub mod classifier;
pub mod lexicon;

pub use classifier::CrisisClassifier;
pub use lexicon::CrisisLexicon;
