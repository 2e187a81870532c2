// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use emoheal_core::EmohealError;

/// Maps a tokio-rusqlite error into the workspace error type.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error) -> EmohealError {
    EmohealError::Storage {
        source: Box::new(e),
    }
}

/// Maps a `call` error whose closure produces [`EmohealError`] back into the
/// workspace error type, unwrapping the application-specific variant.
fn map_call_err(e: tokio_rusqlite::Error<EmohealError>) -> EmohealError {
    match e {
        tokio_rusqlite::Error::Error(inner) => inner,
        tokio_rusqlite::Error::Close((_, src)) => EmohealError::Storage {
            source: Box::new(src),
        },
        other => EmohealError::Storage {
            source: Box::new(EmohealError::Internal(other.to_string())),
        },
    }
}

/// Handle to the single SQLite connection.
///
/// Opened once at startup; query modules accept `&Database` and call
/// through [`Database::connection`].
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path`, applies PRAGMAs,
    /// and runs pending migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, EmohealError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| EmohealError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        let conn = tokio_rusqlite::Connection::open(path.to_string())
            .await
            .map_err(|e| EmohealError::Storage {
                source: Box::new(e),
            })?;

        conn.call(move |c| {
            if wal_mode {
                c.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")
                    .map_err(|e| EmohealError::Storage {
                        source: Box::new(e),
                    })?;
            }
            c.execute_batch("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
                .map_err(|e| EmohealError::Storage {
                    source: Box::new(e),
                })?;
            crate::migrations::run_migrations(c)?;
            Ok(())
        })
        .await
        .map_err(map_call_err)?;

        tracing::debug!(path = %path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoints the WAL so all committed data lands in the main file.
    pub async fn close(&self) -> Result<(), EmohealError> {
        self.conn
            .call(|c| {
                c.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}
