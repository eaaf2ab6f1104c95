//! Core deterministic primitives.
//!
//! The mixing engine and seed normalization rules. Everything here is
//! bit-exact across platforms; saved runs and replays depend on it.

pub mod engine;
pub mod seed;

// Re-export core types
pub use engine::Mulberry32;
pub use seed::{clock_seed, hash_label, Seed};
