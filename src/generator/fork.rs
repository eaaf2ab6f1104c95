//! Fork Protocol
//!
//! Derives fully independent child generators from a parent's current
//! state. Forking is how unrelated subsystems (audio, spawns, starfield,
//! upgrades) each get an exclusive stream: once a child exists, nothing the
//! parent or any sibling does can perturb it.
//!
//! Fork creation order on a shared parent is part of the deterministic
//! contract. Build the fork tree in one sequential phase before handing
//! streams out; to rebuild it without disturbing the parent's future
//! stream, snapshot the parent, fork, then restore.

use tracing::debug;

use crate::core::seed::hash_label;

use super::Generator;

/// Registry label used for forks created without a seed or scope.
const ANONYMOUS_LABEL: &str = "anonymous";

impl Generator {
    /// Fork a child seeded by one raw draw from this generator.
    ///
    /// Advances the parent by exactly one step.
    pub fn fork(&mut self) -> Generator {
        self.stats.calls.fork += 1;
        let derived = self.step();
        self.register_fork(ANONYMOUS_LABEL.to_string(), derived)
    }

    /// Fork a child from an explicit seed without consuming any parent
    /// randomness. Only the low 32 bits of `seed` are used.
    pub fn fork_seed(&mut self, seed: i64) -> Generator {
        self.stats.calls.fork += 1;
        let derived = seed as u32;
        self.register_fork(format!("seed:{}", seed), derived)
    }

    /// Fork a child for a named scope.
    ///
    /// The derived seed mixes one raw parent draw with the label hash, so
    /// distinct scopes forked from the same parent state get distinct
    /// streams, while the same scope forked from the same parent state is
    /// reproducible. Advances the parent by exactly one step.
    ///
    /// # Example
    ///
    /// ```
    /// use seedfork::Generator;
    ///
    /// let mut world = Generator::new(2025);
    /// let mut audio = world.fork_scope("audio");
    /// let mut spawns = world.fork_scope("spawns");
    ///
    /// // Each subsystem now draws independently of the others.
    /// audio.float();
    /// assert!((0..=100).contains(&spawns.int(0, 100)));
    /// ```
    pub fn fork_scope(&mut self, label: &str) -> Generator {
        self.stats.calls.fork += 1;
        let derived = self.step() ^ hash_label(label);
        self.register_fork(format!("scope:{}", label), derived)
    }

    fn register_fork(&mut self, label: String, derived: u32) -> Generator {
        debug!("Forked {} (derived seed {})", label, derived);
        self.stats.record_fork(label, derived);
        Generator::new(derived)
    }
}

// =============================================================================
// TESTS
// =============================================================================
