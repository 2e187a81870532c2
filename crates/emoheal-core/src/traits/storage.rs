// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for durable exchange and alert persistence.

use async_trait::async_trait;

use crate::error::EmohealError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CrisisAlert, ExchangeRecord};

/// Adapter for the durable storage layer.
///
/// Exchange records and crisis alerts are append-only; the only mutation
/// the schema admits is the alert `resolved` flag, owned by an external
/// operator workflow.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Opens the backing store and runs any pending migrations.
    async fn initialize(&self) -> Result<(), EmohealError>;

    /// Flushes and closes the backing store.
    async fn close(&self) -> Result<(), EmohealError>;

    // --- Exchange operations ---

    /// Appends one exchange record.
    async fn insert_exchange(&self, record: &ExchangeRecord) -> Result<(), EmohealError>;

    /// Total exchange count for a user.
    async fn count_exchanges(&self, user_id: &str) -> Result<i64, EmohealError>;

    /// One page of a user's exchanges, newest first.
    async fn get_exchanges(
        &self,
        user_id: &str,
        limit: i64,
        skip: i64,
    ) -> Result<Vec<ExchangeRecord>, EmohealError>;

    /// A user's exchanges at or after the given RFC 3339 cutoff, oldest first.
    async fn get_exchanges_since(
        &self,
        user_id: &str,
        cutoff: &str,
    ) -> Result<Vec<ExchangeRecord>, EmohealError>;

    /// Number of distinct sessions a user has had.
    async fn count_sessions(&self, user_id: &str) -> Result<i64, EmohealError>;

    /// Timestamp of a user's most recent exchange, if any.
    async fn latest_exchange_at(&self, user_id: &str) -> Result<Option<String>, EmohealError>;

    // --- Crisis alert operations ---

    /// Appends one crisis alert.
    async fn insert_alert(&self, alert: &CrisisAlert) -> Result<(), EmohealError>;

    /// A user's alerts, newest first, optionally filtered by resolved flag.
    async fn list_alerts(
        &self,
        user_id: &str,
        resolved: Option<bool>,
    ) -> Result<Vec<CrisisAlert>, EmohealError>;

    /// Number of a user's unresolved alerts.
    async fn count_unresolved_alerts(&self, user_id: &str) -> Result<i64, EmohealError>;

    /// Total alert count for a user.
    async fn count_alerts(&self, user_id: &str) -> Result<i64, EmohealError>;
}
