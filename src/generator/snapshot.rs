//! Snapshot / Restore
//!
//! Captures and reinstates `{seed, state, stats}` for audit, debugging,
//! and reseed flows. The payload is a plain serializable structure; hosts
//! may persist it (e.g. for replay recording), but persistence itself is
//! the host's responsibility.

use serde_json::Value;
use tracing::debug;

use crate::error::RngError;

use super::stats::GeneratorStats;
use super::Generator;

/// Serializable capture of a generator's full state.
///
/// Restoring a snapshot exactly undoes any advances made since it was
/// taken: the next operation produces the output it would have produced
/// at capture time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    /// Seed the generator was last (re)initialized with.
    pub seed: u32,
    /// Engine state at capture time.
    pub state: u32,
    /// Full statistics block. Optional so hosts may persist a slim payload;
    /// restore falls back to minimal stats when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<GeneratorStats>,
}

impl Snapshot {
    /// Parse a host-persisted payload.
    ///
    /// Fails with [`RngError::InvalidSnapshot`] when `seed` or `state` is
    /// missing or not a 32-bit unsigned number. A malformed `stats` block
    /// is treated as absent rather than fatal, matching the restore
    /// fallback for slim payloads.
    pub fn from_value(value: &Value) -> Result<Self, RngError> {
        let object = value
            .as_object()
            .ok_or_else(|| RngError::snapshot("payload is not an object"))?;

        let seed = read_u32(object, "seed")?;
        let state = read_u32(object, "state")?;
        let stats = object
            .get("stats")
            .cloned()
            .and_then(|raw| serde_json::from_value(raw).ok());

        Ok(Self { seed, state, stats })
    }
}

fn read_u32(object: &serde_json::Map<String, Value>, field: &str) -> Result<u32, RngError> {
    let value = object
        .get(field)
        .ok_or_else(|| RngError::snapshot(format!("missing field `{}`", field)))?;
    let number = value
        .as_u64()
        .filter(|n| *n <= u64::from(u32::MAX))
        .ok_or_else(|| RngError::snapshot(format!("field `{}` is not a 32-bit number", field)))?;
    Ok(number as u32)
}

impl Generator {
    /// Deep copy of `{seed, state, stats}` for diagnostics.
    ///
    /// Advances no engine state; the only trace it leaves is its own call
    /// counter, which is included in the copy.
    pub fn debug_snapshot(&mut self) -> Snapshot {
        self.stats.calls.debug_snapshot += 1;
        self.capture()
    }

    /// Snapshot payload intended for host persistence. Identical shape to
    /// [`Generator::debug_snapshot`], tracked under its own counter.
    pub fn serialize(&mut self) -> Snapshot {
        self.stats.calls.serialize += 1;
        self.capture()
    }

    fn capture(&self) -> Snapshot {
        Snapshot {
            seed: self.seed,
            state: self.engine.state(),
            stats: Some(self.stats.clone()),
        }
    }

    /// Reinstate a previously captured snapshot.
    ///
    /// Applies seed and engine state; restores the full statistics block
    /// when the snapshot carries one, otherwise reinitializes minimal
    /// stats (fresh history seeded with the snapshot's seed).
    pub fn restore(&mut self, snapshot: &Snapshot) {
        debug!(
            "Restored snapshot (seed {}, state {})",
            snapshot.seed, snapshot.state
        );
        self.seed = snapshot.seed;
        self.engine.set_state(snapshot.state);
        self.stats = match &snapshot.stats {
            Some(stats) => stats.clone(),
            None => GeneratorStats::new(snapshot.seed),
        };
        self.stats.calls.restore += 1;
    }

    /// Reinstate from an untrusted host-persisted payload.
    ///
    /// Fails with [`RngError::InvalidSnapshot`] without touching the
    /// generator when the payload is malformed.
    pub fn restore_value(&mut self, value: &Value) -> Result<(), RngError> {
        let snapshot = Snapshot::from_value(value)?;
        self.restore(&snapshot);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_restore_undoes_advances() {
        let mut rng = Generator::new(31337);
        rng.float();
        rng.int(0, 9);

        let snap = rng.debug_snapshot();
        let expected = {
            let mut witness = rng.clone();
            witness.float()
        };

        // Advance past the snapshot, then rewind
        for _ in 0..25 {
            rng.float();
        }
        rng.uuid("enemy");
        rng.restore(&snap);

        assert_eq!(rng.float(), expected);
    }

    #[test]
    fn test_debug_snapshot_is_pure_read() {
        let mut rng = Generator::new(12);
        rng.float();
        let state_before = rng.state();

        let snap = rng.debug_snapshot();

        assert_eq!(rng.state(), state_before);
        assert_eq!(snap.state, state_before);
        // Only its own counter moved, and the copy includes it
        assert_eq!(rng.stats().calls.debug_snapshot, 1);
        assert_eq!(
            snap.stats.as_ref().unwrap().calls.debug_snapshot,
            1
        );
    }

    #[test]
    fn test_serialize_tracked_separately() {
        let mut rng = Generator::new(12);
        rng.serialize();
        rng.debug_snapshot();

        assert_eq!(rng.stats().calls.serialize, 1);
        assert_eq!(rng.stats().calls.debug_snapshot, 1);
    }

    #[test]
    fn test_restore_with_full_stats() {
        let mut rng = Generator::new(5);
        rng.fork_scope("audio");
        let snap = rng.serialize();

        let mut other = Generator::new(999);
        other.restore(&snap);

        assert_eq!(other.seed(), 5);
        assert_eq!(other.state(), snap.state);
        assert_eq!(
            other.stats().fork_registry.get("scope:audio"),
            rng.stats().fork_registry.get("scope:audio")
        );
        assert_eq!(other.stats().calls.restore, 1);
    }

    #[test]
    fn test_restore_without_stats_reinitializes() {
        let mut rng = Generator::new(5);
        rng.fork_scope("audio");

        rng.restore(&Snapshot {
            seed: 42,
            state: 42,
            stats: None,
        });

        assert_eq!(rng.seed(), 42);
        assert_eq!(rng.stats().seed_history, [42]);
        assert!(rng.stats().fork_registry.is_empty());
        assert_eq!(rng.stats().calls.restore, 1);
    }

    #[test]
    fn test_payload_roundtrip_through_json() {
        let mut rng = Generator::new(2317);
        rng.float();
        let snap = rng.serialize();

        let value = serde_json::to_value(&snap).unwrap();
        let back = Snapshot::from_value(&value).unwrap();
        assert_eq!(back, snap);

        let mut restored = Generator::new(0);
        restored.restore_value(&value).unwrap();
        assert_eq!(restored.float(), rng.float());
    }

    #[test]
    fn test_invalid_payloads_rejected() {
        let mut rng = Generator::new(1);
        let state_before = rng.state();

        let bad = [
            json!(null),
            json!([1, 2, 3]),
            json!({"state": 7}),
            json!({"seed": 7}),
            json!({"seed": "seven", "state": 7}),
            json!({"seed": 7, "state": -1}),
            json!({"seed": 7, "state": 4294967296u64}),
            json!({"seed": 1.5, "state": 7}),
        ];
        for payload in bad {
            let err = rng.restore_value(&payload).unwrap_err();
            assert!(matches!(err, RngError::InvalidSnapshot { .. }));
        }

        // Failed restores leave the generator untouched
        assert_eq!(rng.state(), state_before);
        assert_eq!(rng.stats().calls.restore, 0);
    }

    #[test]
    fn test_malformed_stats_treated_as_absent() {
        let value = json!({"seed": 9, "state": 9, "stats": "gibberish"});
        let snap = Snapshot::from_value(&value).unwrap();
        assert!(snap.stats.is_none());
    }

    proptest! {
        #[test]
        fn prop_restore_roundtrip(seed in any::<u32>(), advance in 0usize..40) {
            let mut rng = Generator::new(seed);
            rng.float();

            let snap = rng.debug_snapshot();
            let expected = {
                let mut witness = rng.clone();
                witness.next_u32()
            };

            for _ in 0..advance {
                rng.float();
            }
            rng.restore(&snap);

            prop_assert_eq!(rng.next_u32(), expected);
        }
    }
}
