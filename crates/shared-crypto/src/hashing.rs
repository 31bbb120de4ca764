//! # Routing Hashes
//!
//! `HashType` is a 128-bit identifier for topics and connections, read as a
//! big-endian binary fraction in [0, 1). Brokers bucket by the high bits of `a`.
//!
//! Distribution only: BLAKE3 output truncated to 128 bits gives uniform
//! buckets, but nothing here is meant to resist adversarially chosen names.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::CryptoError;

/// 128-bit routing identifier made of two big-endian halves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HashType {
    a: u64,
    b: u64,
}

impl HashType {
    /// Build from the two halves.
    pub const fn from_parts(a: u64, b: u64) -> Self {
        Self { a, b }
    }

    /// Hash a string.
    pub fn from_string(s: &str) -> Self {
        Self::from_bytes(s.as_bytes())
    }

    /// Hash arbitrary bytes.
    // BLAKE3, not MD5: values differ from brokers that bucket by MD5.
    pub fn from_bytes(data: &[u8]) -> Self {
        let digest = blake3::hash(data);
        let bytes = digest.as_bytes();
        let mut high = [0u8; 8];
        let mut low = [0u8; 8];
        high.copy_from_slice(&bytes[0..8]);
        low.copy_from_slice(&bytes[8..16]);
        Self {
            a: u64::from_be_bytes(high),
            b: u64::from_be_bytes(low),
        }
    }

    /// Random identifier, e.g. for a fresh connection.
    pub fn random() -> Self {
        Self {
            a: rand::random(),
            b: rand::random(),
        }
    }

    /// High half.
    pub fn a(&self) -> u64 {
        self.a
    }

    /// Low half.
    pub fn b(&self) -> u64 {
        self.b
    }

    /// The top `n` bits of the fraction, for bucket selection.
    ///
    /// Only `n < 64` is supported; wider slices would need bits from `b`.
    pub fn fractional_bits(&self, n: u32) -> Result<u64, CryptoError> {
        if n >= 64 {
            return Err(CryptoError::InvalidInput(format!(
                "fractional_bits supports n < 64, got {}",
                n
            )));
        }
        Ok(self.a.checked_shr(64 - n).unwrap_or(0))
    }

    /// The 16 bytes in big-endian order.
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&self.a.to_be_bytes());
        out[8..].copy_from_slice(&self.b.to_be_bytes());
        out
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.a)
    }
}

impl From<&str> for HashType {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}
