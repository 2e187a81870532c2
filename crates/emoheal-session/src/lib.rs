// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session loop for the EmoHeal support chat backend.
//!
//! A [`ChatSession`] owns one conversation: it sequences every inbound
//! message through crisis triage, feature extraction, response selection,
//! and persistence, then emits a [`ServerEvent`] reply. One turn is fully
//! processed before the next is accepted; concurrent sessions share only
//! the durable storage layer and the read-only [`TherapyEngine`] tables.

pub mod engine;
pub mod events;
pub mod session;
pub mod shutdown;

pub use engine::TherapyEngine;
pub use events::{CrisisResources, ServerEvent};
pub use session::{ChatSession, SessionState};
