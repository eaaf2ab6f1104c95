//! Error types
//!
//! Every failure surfaces synchronously to the caller. There are no retries
//! and no logging-and-swallowing. Note the deliberate asymmetry: empty-input
//! `pick` / `weighted_pick` return `None` rather than an error, because
//! callers rely on the sentinel as a fallback branch.

use thiserror::Error;

/// Generator errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RngError {
    /// Seed input is not a finite number, string, or 64-bit integer.
    #[error("seed must be a finite number, a string, or a 64-bit integer")]
    InvalidSeedKind,
    /// An operation received bounds it cannot coerce (non-finite floats).
    #[error("{op} requires finite numeric bounds")]
    TypeMismatch {
        /// Name of the operation that rejected its arguments.
        op: &'static str,
    },
    /// Snapshot payload is missing numeric `seed`/`state` fields.
    #[error("invalid snapshot: {reason}")]
    InvalidSnapshot {
        /// What was wrong with the payload.
        reason: String,
    },
}

impl RngError {
    /// Shorthand for an [`RngError::InvalidSnapshot`] with the given reason.
    pub(crate) fn snapshot(reason: impl Into<String>) -> Self {
        RngError::InvalidSnapshot {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
