//! Seed Normalization
//!
//! Coerces heterogeneous seed inputs (integers, floats, strings) into the
//! canonical 32-bit seed the engine runs on. The string hash and float
//! truncation rules are part of the save/replay contract and must not change.

use chrono::Utc;
use serde_json::Value;

use crate::error::RngError;

/// 2^32 as f64, the wrap modulus for float seeds.
const TWO_POW_32: f64 = 4_294_967_296.0;

/// A seed input before normalization.
///
/// Constructed via `From` for the common integer, float, and string types,
/// or from untrusted host input via [`Seed::from_value`].
#[derive(Clone, Debug, PartialEq)]
pub enum Seed {
    /// Integer seed; only the low 32 bits are used.
    Int(i64),
    /// Floating-point seed; truncated toward zero and wrapped into
    /// `[0, 2^32)`. Non-finite values are rejected.
    Number(f64),
    /// String seed; hashed with the 31-multiplier rolling hash.
    Text(String),
}

impl Seed {
    /// Normalize to the canonical 32-bit seed.
    ///
    /// Fails with [`RngError::InvalidSeedKind`] for non-finite floats.
    pub fn normalize(&self) -> Result<u32, RngError> {
        match self {
            Seed::Int(n) => Ok(*n as u32),
            Seed::Number(x) => {
                if !x.is_finite() {
                    return Err(RngError::InvalidSeedKind);
                }
                Ok(wrap_u32(*x))
            }
            Seed::Text(s) => Ok(hash_label(s)),
        }
    }

    /// Accept a seed from an untrusted JSON payload.
    ///
    /// Numbers and strings are accepted; everything else (null, booleans,
    /// arrays, objects) fails with [`RngError::InvalidSeedKind`].
    pub fn from_value(value: &Value) -> Result<Self, RngError> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Seed::Int(i))
                } else if let Some(u) = n.as_u64() {
                    // Above i64::MAX; only the low 32 bits matter anyway.
                    Ok(Seed::Int(u as i64))
                } else {
                    Ok(Seed::Number(n.as_f64().ok_or(RngError::InvalidSeedKind)?))
                }
            }
            Value::String(s) => Ok(Seed::Text(s.clone())),
            _ => Err(RngError::InvalidSeedKind),
        }
    }
}

impl From<u32> for Seed {
    fn from(n: u32) -> Self {
        Seed::Int(i64::from(n))
    }
}

impl From<i32> for Seed {
    fn from(n: i32) -> Self {
        Seed::Int(i64::from(n))
    }
}

impl From<i64> for Seed {
    fn from(n: i64) -> Self {
        Seed::Int(n)
    }
}

impl From<u64> for Seed {
    fn from(n: u64) -> Self {
        // Low 32 bits survive the cast, which is all normalization keeps.
        Seed::Int(n as i64)
    }
}

impl From<f64> for Seed {
    fn from(x: f64) -> Self {
        Seed::Number(x)
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Seed::Text(s.to_string())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Self {
        Seed::Text(s)
    }
}

/// 32-bit rolling hash over UTF-16 code units: `h = h * 31 + unit`, wrapping.
///
/// This exact formula is load-bearing: scope labels are mixed into fork
/// seeds with it, and saved runs replay against the values it produces.
pub fn hash_label(s: &str) -> u32 {
    let mut h: u32 = 0;
    for unit in s.encode_utf16() {
        h = h.wrapping_mul(31).wrapping_add(u32::from(unit));
    }
    h
}

/// Truncate toward zero and wrap into `[0, 2^32)`.
fn wrap_u32(x: f64) -> u32 {
    let t = x.trunc();
    let mut m = t % TWO_POW_32;
    if m < 0.0 {
        m += TWO_POW_32;
    }
    m as u32
}

/// Seed derived from the wall clock (low 32 bits of the Unix millisecond
/// timestamp). Used when the host does not care about reproducing the run.
pub fn clock_seed() -> u32 {
    Utc::now().timestamp_millis() as u32
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_low_bits() {
        assert_eq!(Seed::from(0u32).normalize().unwrap(), 0);
        assert_eq!(Seed::from(42u32).normalize().unwrap(), 42);
        assert_eq!(
            Seed::from(0x1_2345_6789_u64).normalize().unwrap(),
            0x2345_6789
        );
        assert_eq!(Seed::from(-1i64).normalize().unwrap(), u32::MAX);
    }

    #[test]
    fn test_float_truncation() {
        assert_eq!(Seed::from(1.99f64).normalize().unwrap(), 1);
        assert_eq!(Seed::from(-1.5f64).normalize().unwrap(), 4294967295);
        // Above 2^32 wraps
        let big = 2f64.powi(33) + 5.9;
        assert_eq!(Seed::from(big).normalize().unwrap(), 5);
        assert_eq!(Seed::from(-0.0f64).normalize().unwrap(), 0);
    }

    #[test]
    fn test_nonfinite_rejected() {
        assert_eq!(
            Seed::from(f64::NAN).normalize(),
            Err(RngError::InvalidSeedKind)
        );
        assert_eq!(
            Seed::from(f64::INFINITY).normalize(),
            Err(RngError::InvalidSeedKind)
        );
    }

    #[test]
    fn test_hash_known_values() {
        // These values must never change: scope labels and string seeds
        // from saved runs hash to them.
        assert_eq!(hash_label(""), 0);
        assert_eq!(hash_label("audio"), 93166550);
        assert_eq!(hash_label("starfield"), 2153364968);
    }

    #[test]
    fn test_hash_distinguishes_labels() {
        assert_ne!(hash_label("spawns"), hash_label("upgrades"));
    }

    #[test]
    fn test_from_value() {
        assert_eq!(Seed::from_value(&json!(12)).unwrap(), Seed::Int(12));
        assert_eq!(
            Seed::from_value(&json!("boss")).unwrap(),
            Seed::Text("boss".into())
        );
        assert_eq!(Seed::from_value(&json!(1.5)).unwrap(), Seed::Number(1.5));

        for bad in [json!(null), json!(true), json!([1, 2]), json!({"a": 1})] {
            assert_eq!(Seed::from_value(&bad), Err(RngError::InvalidSeedKind));
        }
    }

    #[test]
    fn test_string_seed_matches_label_hash() {
        assert_eq!(
            Seed::from("starfield").normalize().unwrap(),
            hash_label("starfield")
        );
    }
}
