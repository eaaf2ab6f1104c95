//! Generator Statistics
//!
//! Per-operation call counters, a bounded seed history, and the fork
//! registry. Statistics are diagnostic only: they never influence outputs,
//! and they travel with snapshots so a restored generator audits the same.
//! Uses BTreeMap for deterministic iteration order.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

/// Maximum number of entries retained in the seed history ring.
pub const SEED_HISTORY_CAP: usize = 10;

/// One counter per public generator operation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallCounters {
    /// Raw engine draws requested directly.
    #[serde(default)]
    pub next_u32: u64,
    /// Unit-interval float draws.
    #[serde(default)]
    pub float: u64,
    /// Inclusive integer range draws.
    #[serde(default)]
    pub int: u64,
    /// Continuous range draws.
    #[serde(default)]
    pub range: u64,
    /// Boolean chance draws.
    #[serde(default)]
    pub chance: u64,
    /// Uniform picks from a slice.
    #[serde(default)]
    pub pick: u64,
    /// Weighted picks (slice or map form).
    #[serde(default)]
    pub weighted_pick: u64,
    /// Scoped id generations.
    #[serde(default)]
    pub uuid: u64,
    /// In-place shuffles.
    #[serde(default)]
    pub shuffle: u64,
    /// Forks created (anonymous, seeded, or scoped).
    #[serde(default)]
    pub fork: u64,
    /// Reseeds.
    #[serde(default)]
    pub reset: u64,
    /// Snapshot payloads produced for persistence.
    #[serde(default)]
    pub serialize: u64,
    /// Diagnostic snapshots taken.
    #[serde(default)]
    pub debug_snapshot: u64,
    /// Snapshots applied.
    #[serde(default)]
    pub restore: u64,
}

/// Full statistics block carried by every generator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorStats {
    /// Call counters for every public operation.
    #[serde(default)]
    pub calls: CallCounters,
    /// Seeds this generator has been driven by, oldest first. Bounded at
    /// [`SEED_HISTORY_CAP`]; oldest entries are evicted first.
    #[serde(default)]
    pub seed_history: VecDeque<u32>,
    /// Last derived seed per fork label. Later forks with the same label
    /// overwrite earlier ones.
    #[serde(default)]
    pub fork_registry: BTreeMap<String, u32>,
}

impl GeneratorStats {
    /// Fresh statistics for a generator starting at `seed`.
    pub fn new(seed: u32) -> Self {
        let mut stats = Self::default();
        stats.record_seed(seed);
        stats
    }

    /// Append a seed to the history ring, evicting the oldest entry when
    /// the ring is full.
    pub fn record_seed(&mut self, seed: u32) {
        if self.seed_history.len() == SEED_HISTORY_CAP {
            self.seed_history.pop_front();
        }
        self.seed_history.push_back(seed);
    }

    /// Record a fork derivation: registry entry plus history append.
    pub fn record_fork(&mut self, label: String, derived: u32) {
        self.fork_registry.insert(label, derived);
        self.record_seed(derived);
    }
}

// =============================================================================
// TESTS
// =============================================================================
