// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the EmoHeal support chat backend.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and typed query operations for
//! exchange records and crisis alerts.
//!
//! The single-writer pattern is enforced by design: [`Database`] wraps one
//! `tokio_rusqlite::Connection`, all query functions accept `&Database` and
//! go through `connection().call()`, and tokio-rusqlite serializes every
//! closure on one background thread. Do NOT open additional connections
//! for writes.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
pub use models::*;
