// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the EmoHeal support chat backend.

use thiserror::Error;

/// The primary error type used across all EmoHeal components.
#[derive(Debug, Error)]
pub enum EmohealError {
    /// Configuration errors (invalid TOML, missing keyword or template
    /// tables, type mismatches). Fatal at startup for the affected component.
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Messaging channel errors (socket failure, bind failure, send failure).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Analysis collaborator errors (sentiment scoring failure). Non-fatal
    /// per turn: the session degrades to an empty feature bundle.
    #[error("analysis error: {message}")]
    Analysis {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
