//! Seeded Generator
//!
//! The public generator type: a seed, a mixing engine, and the statistics
//! block. Every derived operation is built strictly on the engine's raw
//! output so that identical seeds and identical call order reproduce
//! identical values on any platform.
//!
//! Each consumer subsystem is expected to own exactly one generator (or a
//! fork of one); instances are never shared behind a global.

pub mod snapshot;
pub mod stats;

mod fork;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::engine::Mulberry32;
use crate::core::seed::{self, Seed};
use crate::error::RngError;
use self::stats::GeneratorStats;

/// 2^32 as f64; maps raw draws onto the unit interval.
const UNIT_SCALE: f64 = 4_294_967_296.0;

/// Deterministic, seedable random number generator with scope forking.
///
/// # Determinism Guarantee
///
/// Two generators constructed with the same seed and driven through the
/// same ordered sequence of operations produce identical outputs. Call
/// counters and the fork registry are diagnostic only and never feed back
/// into the stream.
///
/// # Example
///
/// ```
/// use seedfork::Generator;
///
/// let mut a = Generator::new(987654321);
/// let mut b = Generator::new(987654321);
/// for _ in 0..8 {
///     assert_eq!(a.float(), b.float());
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Generator {
    seed: u32,
    engine: Mulberry32,
    stats: GeneratorStats,
}

impl Default for Generator {
    /// A generator seeded from the wall clock. Use [`Generator::new`] when
    /// the run must be reproducible.
    fn default() -> Self {
        Self::from_clock()
    }
}

impl Generator {
    /// Create a generator from a canonical 32-bit seed.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            engine: Mulberry32::new(seed),
            stats: GeneratorStats::new(seed),
        }
    }

    /// Create a generator from any supported seed input (integer, float,
    /// or string), normalizing it first.
    pub fn from_seed(seed: impl Into<Seed>) -> Result<Self, RngError> {
        Ok(Self::new(seed.into().normalize()?))
    }

    /// Create a generator seeded from the wall clock.
    pub fn from_clock() -> Self {
        let seed = seed::clock_seed();
        debug!("Seeded generator from clock: {}", seed);
        Self::new(seed)
    }

    /// The seed this generator was last (re)initialized with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Current engine state (for checkpointing/debugging).
    pub fn state(&self) -> u32 {
        self.engine.state()
    }

    /// Statistics collected so far.
    pub fn stats(&self) -> &GeneratorStats {
        &self.stats
    }

    // -------------------------------------------------------------------------
    // Internal draws. These never touch the call counters, so each public
    // operation counts exactly once no matter how it is composed.
    // -------------------------------------------------------------------------

    #[inline]
    fn step(&mut self) -> u32 {
        self.engine.next()
    }

    #[inline]
    fn unit(&mut self) -> f64 {
        f64::from(self.step()) / UNIT_SCALE
    }

    fn int_step(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = if max < min { (max, min) } else { (min, max) };
        // Span in f64 so extreme bounds cannot overflow i64.
        let span = (hi as f64 - lo as f64) + 1.0;
        lo + (self.unit() * span).floor() as i64
    }

    // -------------------------------------------------------------------------
    // Derived operations
    // -------------------------------------------------------------------------

    /// Next raw 32-bit engine output.
    ///
    /// ```
    /// use seedfork::Generator;
    ///
    /// let mut rng = Generator::new(12345);
    /// assert_eq!(rng.next_u32(), 4207900869); // Always the same!
    /// ```
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.stats.calls.next_u32 += 1;
        self.step()
    }

    /// Uniform float in `[0, 1)`.
    #[inline]
    pub fn float(&mut self) -> f64 {
        self.stats.calls.float += 1;
        self.unit()
    }

    /// Uniform integer in `[min, max]`, both inclusive. Bounds are swapped
    /// if given in reverse order.
    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        self.stats.calls.int += 1;
        self.int_step(min, max)
    }

    /// Uniform float in `[min, max)`. Bounds are swapped if given in
    /// reverse order; `range(v, v)` returns `v` exactly without consuming
    /// a draw.
    ///
    /// Fails with [`RngError::TypeMismatch`] for non-finite bounds.
    pub fn range(&mut self, min: f64, max: f64) -> Result<f64, RngError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(RngError::TypeMismatch { op: "range" });
        }
        self.stats.calls.range += 1;
        let (lo, hi) = if max < min { (max, min) } else { (min, max) };
        if lo == hi {
            return Ok(lo);
        }
        Ok(lo + self.unit() * (hi - lo))
    }

    /// True with probability `p`. `p <= 0` is always false and `p >= 1`
    /// always true; neither consumes a draw.
    pub fn chance(&mut self, p: f64) -> bool {
        self.stats.calls.chance += 1;
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.unit() < p
    }

    /// Uniform pick from a slice. Empty slice returns `None` without
    /// consuming a draw; this is a fallback branch for callers, not an
    /// error.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.stats.calls.pick += 1;
        if items.is_empty() {
            return None;
        }
        let idx = self.int_step(0, items.len() as i64 - 1) as usize;
        Some(&items[idx])
    }

    /// Weighted pick from `(value, weight)` entries, in slice order.
    ///
    /// Entries with non-positive or non-finite weights are skipped. If no
    /// usable weight remains, returns `None` without consuming a draw.
    pub fn weighted_pick<'a, T>(&mut self, entries: &'a [(T, f64)]) -> Option<&'a T> {
        self.stats.calls.weighted_pick += 1;
        self.weighted_walk(entries.iter().map(|(value, weight)| (value, *weight)))
    }

    /// Weighted pick over a map, walking entries in key order.
    pub fn weighted_pick_map<'a, K>(&mut self, table: &'a BTreeMap<K, f64>) -> Option<&'a K> {
        self.stats.calls.weighted_pick += 1;
        self.weighted_walk(table.iter().map(|(key, weight)| (key, *weight)))
    }

    fn weighted_walk<'a, T, I>(&mut self, entries: I) -> Option<&'a T>
    where
        I: Iterator<Item = (&'a T, f64)> + Clone,
    {
        let total: f64 = entries
            .clone()
            .map(|(_, weight)| weight)
            .filter(|weight| weight.is_finite() && *weight > 0.0)
            .sum();
        if !total.is_finite() || total <= 0.0 {
            return None;
        }

        let mut threshold = self.unit() * total;
        let mut last = None;
        for (value, weight) in entries {
            if !weight.is_finite() || weight <= 0.0 {
                continue;
            }
            if threshold < weight {
                return Some(value);
            }
            threshold -= weight;
            last = Some(value);
        }
        // Floating error can carry the threshold past the final weight;
        // the last walked entry is the contractual landing spot.
        last
    }

    /// Scoped pseudo-unique id: two consecutive raw draws, hex-encoded and
    /// prefixed with the scope label.
    ///
    /// Deliberately low-entropy and non-cryptographic: ids must replay
    /// byte-for-byte from the same seed.
    pub fn uuid(&mut self, scope: &str) -> String {
        self.stats.calls.uuid += 1;
        let hi = self.step();
        let lo = self.step();
        format!(
            "{}-{}-{}",
            scope,
            hex::encode(hi.to_be_bytes()),
            hex::encode(lo.to_be_bytes())
        )
    }

    /// Shuffle a slice in place using Fisher-Yates.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        self.stats.calls.shuffle += 1;
        for i in (1..slice.len()).rev() {
            let j = self.int_step(0, i as i64) as usize;
            slice.swap(i, j);
        }
    }

    // -------------------------------------------------------------------------
    // Reseed
    // -------------------------------------------------------------------------

    /// Reinitialize seed and engine state from a new seed input. Statistics
    /// lineage is preserved: the new seed is appended to the history rather
    /// than clearing it.
    pub fn reset(&mut self, seed: impl Into<Seed>) -> Result<(), RngError> {
        let normalized = seed.into().normalize()?;
        self.apply_seed(normalized);
        Ok(())
    }

    /// Reinitialize from the wall clock.
    pub fn reset_from_clock(&mut self) {
        self.apply_seed(seed::clock_seed());
    }

    fn apply_seed(&mut self, seed: u32) {
        debug!("Reset generator to seed {}", seed);
        self.seed = seed;
        self.engine = Mulberry32::new(seed);
        self.stats.calls.reset += 1;
        self.stats.record_seed(seed);
    }
}

// =============================================================================
// TESTS
// =============================================================================
