//! # Seedfork
//!
//! Deterministic, fork-scoped random number service for replay-exact
//! simulation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         SEEDFORK                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Deterministic primitives                 │
//! │  ├── engine.rs    - Mulberry32 32-bit mixing step            │
//! │  └── seed.rs      - Seed normalization (int/float/string)    │
//! │                                                              │
//! │  generator/       - Public generator service                 │
//! │  ├── mod.rs       - Derived operations (float, int, range,   │
//! │  │                  chance, pick, weighted pick, uuid, ...)  │
//! │  ├── fork.rs      - Scope forking protocol                   │
//! │  ├── snapshot.rs  - Snapshot / restore                       │
//! │  └── stats.rs     - Call counters, seed history, registry    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Identical seed + identical ordered operation calls ⇒ identical output
//! sequence, on any platform:
//! - All engine arithmetic is wrapping unsigned 32-bit
//! - No `HashMap` in recorded state (BTreeMap for sorted iteration)
//! - Wall-clock time only ever enters through explicit clock seeding
//!
//! ## Forking
//!
//! Each subsystem gets an exclusive stream by forking the world generator
//! once, during a sequential build phase:
//!
//! ```
//! use seedfork::Generator;
//!
//! let mut world = Generator::new(987654321);
//! let mut audio = world.fork_scope("audio");
//! let mut spawns = world.fork_scope("spawns");
//!
//! // Later draws are isolated: audio cannot perturb spawns.
//! let _variation = audio.float();
//! let _formation = spawns.int(0, 4);
//! ```
//!
//! There is deliberately no global instance: generators reach consumers by
//! explicit injection, which keeps the determinism contract auditable.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod generator;

// Re-export commonly used types
pub use crate::core::engine::Mulberry32;
pub use crate::core::seed::{clock_seed, hash_label, Seed};
pub use crate::error::RngError;
pub use crate::generator::snapshot::Snapshot;
pub use crate::generator::stats::{CallCounters, GeneratorStats, SEED_HISTORY_CAP};
pub use crate::generator::Generator;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
