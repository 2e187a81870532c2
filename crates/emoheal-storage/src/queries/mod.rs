// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules over the single database connection.

pub mod alerts;
pub mod exchanges;
