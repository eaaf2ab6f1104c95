//! Core Mixing Engine
//!
//! Mulberry32: a single 32-bit state word advanced by one deterministic
//! mixing step per draw. Given the same seed, produces the identical
//! sequence on all platforms.

use serde::{Deserialize, Serialize};

/// Additive constant applied to the state on every step.
const STEP: u32 = 0x6D2B_79F5;

/// Deterministic 32-bit PRNG core.
///
/// # Determinism Guarantee
///
/// All arithmetic is wrapping unsigned 32-bit. Given the same seed, this
/// engine produces the exact same sequence on any platform (x86, ARM, WASM).
/// Saved runs depend on these bits; the step must never change.
///
/// # Example
///
/// ```
/// use seedfork::core::engine::Mulberry32;
///
/// let mut engine = Mulberry32::new(12345);
/// assert_eq!(engine.next(), 4207900869); // Always the same!
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Create an engine whose state starts at `seed`.
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance one step and return the next raw 32-bit value.
    #[inline]
    pub fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_add(STEP);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Current state word (for checkpointing).
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Restore a previously captured state word.
    pub fn set_state(&mut self, state: u32) {
        self.state = state;
    }
}

// =============================================================================
// TESTS
// =============================================================================
