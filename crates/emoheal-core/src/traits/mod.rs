// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for EmoHeal's collaborator seams.
//!
//! Async adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod sentiment;
pub mod storage;

pub use adapter::PluginAdapter;
pub use sentiment::SentimentAnalyzer;
pub use storage::StorageAdapter;
