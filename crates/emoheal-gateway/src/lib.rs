// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP/WebSocket gateway for the EmoHeal support chat backend.
//!
//! Serves the per-user chat socket (`/ws/chat/{user_id}`) and the read-only
//! query endpoints over storage (chat history, mood summary, crisis alerts,
//! user statistics, database health). Each socket owns its own
//! [`ChatSession`](emoheal_session::ChatSession) and processes turns
//! sequentially; sessions share only the storage adapter and the read-only
//! therapy engine.

pub mod handlers;
pub mod server;
pub mod summary;
pub mod ws;

use std::sync::Arc;

use emoheal_core::StorageAdapter;
use emoheal_session::TherapyEngine;

pub use server::{start_server, ServerConfig};

/// Query endpoint windowing limits.
///
/// Mirrors `SummaryConfig` from `emoheal-config` to avoid a dependency on
/// the config crate from the gateway crate.
#[derive(Debug, Clone, Copy)]
pub struct QueryLimits {
    /// Default mood-summary window in days.
    pub default_days: i64,
    /// Maximum accepted mood-summary window in days.
    pub max_days: i64,
    /// Maximum page size for chat history queries.
    pub history_page_limit: i64,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_days: 7,
            max_days: 90,
            history_page_limit: 500,
        }
    }
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Durable storage, shared by all sessions and query endpoints.
    pub storage: Arc<dyn StorageAdapter + Send + Sync>,
    /// Read-only triage/extraction/selection components.
    pub engine: Arc<TherapyEngine>,
    /// First message sent on every chat connection.
    pub welcome_message: Arc<str>,
    /// Query endpoint windowing limits.
    pub limits: QueryLimits,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}
