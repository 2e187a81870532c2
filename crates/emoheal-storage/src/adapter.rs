// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use emoheal_config::model::StorageConfig;
use emoheal_core::types::{CrisisAlert, ExchangeRecord};
use emoheal_core::{AdapterType, EmohealError, HealthStatus, PluginAdapter, StorageAdapter};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`StorageAdapter::initialize`]
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, EmohealError> {
        self.db.get().ok_or_else(|| EmohealError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, EmohealError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), EmohealError> {
        // Shutdown delegates to close if the DB was initialized.
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), EmohealError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| EmohealError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), EmohealError> {
        self.db()?.close().await
    }

    // --- Exchange operations ---

    async fn insert_exchange(&self, record: &ExchangeRecord) -> Result<(), EmohealError> {
        queries::exchanges::insert_exchange(self.db()?, record).await
    }

    async fn count_exchanges(&self, user_id: &str) -> Result<i64, EmohealError> {
        queries::exchanges::count_for_user(self.db()?, user_id).await
    }

    async fn get_exchanges(
        &self,
        user_id: &str,
        limit: i64,
        skip: i64,
    ) -> Result<Vec<ExchangeRecord>, EmohealError> {
        queries::exchanges::page_for_user(self.db()?, user_id, limit, skip).await
    }

    async fn get_exchanges_since(
        &self,
        user_id: &str,
        cutoff: &str,
    ) -> Result<Vec<ExchangeRecord>, EmohealError> {
        queries::exchanges::since_for_user(self.db()?, user_id, cutoff).await
    }

    async fn count_sessions(&self, user_id: &str) -> Result<i64, EmohealError> {
        queries::exchanges::distinct_sessions(self.db()?, user_id).await
    }

    async fn latest_exchange_at(&self, user_id: &str) -> Result<Option<String>, EmohealError> {
        queries::exchanges::latest_created_at(self.db()?, user_id).await
    }

    // --- Crisis alert operations ---

    async fn insert_alert(&self, alert: &CrisisAlert) -> Result<(), EmohealError> {
        queries::alerts::insert_alert(self.db()?, alert).await
    }

    async fn list_alerts(
        &self,
        user_id: &str,
        resolved: Option<bool>,
    ) -> Result<Vec<CrisisAlert>, EmohealError> {
        queries::alerts::list_for_user(self.db()?, user_id, resolved).await
    }

    async fn count_unresolved_alerts(&self, user_id: &str) -> Result<i64, EmohealError> {
        queries::alerts::count_unresolved(self.db()?, user_id).await
    }

    async fn count_alerts(&self, user_id: &str) -> Result<i64, EmohealError> {
        queries::alerts::count_for_user(self.db()?, user_id).await
    }
}
