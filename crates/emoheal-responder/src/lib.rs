// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Therapeutic response selection for the EmoHeal support chat backend.
//!
//! The [`ResponseSelector`] maps a feature bundle, risk tier, and session
//! history to a single reply string. Crisis tiers short-circuit to the
//! crisis templates; otherwise a therapy mode is chosen and its template
//! table consulted through an explicit ordered lookup chain that always
//! ends in a literal default -- this component never errors.

pub mod random;
pub mod selector;
pub mod templates;

pub use random::{RandomSource, ThreadRngSource};
pub use selector::{ResponseSelector, TherapyMode};
pub use templates::TemplateTable;
