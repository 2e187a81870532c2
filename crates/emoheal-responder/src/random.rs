// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Injectable random source for template variant selection.
//!
//! The historical-reference prefix is an enumerated choice over a fixed set
//! of variants; production binds a thread-rng source, tests bind a
//! deterministic one.

use rand::Rng;

/// Uniform random choice over a small option set.
pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..options`. `options` must be non-zero.
    fn choose(&self, options: usize) -> usize;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Default, Clone)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn choose(&self, options: usize) -> usize {
        rand::thread_rng().gen_range(0..options)
    }
}
