use std::fmt;
use std::str::FromStr;

use xxhash_rust::xxh64::xxh64;

use crate::error::StrategyError;

// ─── HashStrategy ───────────────────────────────────────────────────────────

/// The closed set of bucket-index functions.
///
/// A table is constructed with exactly one strategy and uses it for every
/// insert and lookup for its whole lifetime. There is deliberately no way to
/// swap the strategy afterwards: existing bucket placement would become
/// unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashStrategy {
    /// Base-31 polynomial rolling hash over the key bytes, 32-bit wrapping.
    #[default]
    Poly31,
    /// djb2: seed 5381, times 33 per byte, 32-bit wrapping.
    Djb2,
    /// xxh64 over the key bytes.
    Xxh64,
}

impl HashStrategy {
    /// Map `key` to a bucket index in `[0, slot_count)`.
    ///
    /// Pure and deterministic: the same key and slot count always produce the
    /// same index, across runs and platforms.
    pub fn index(self, key: &str, slot_count: usize) -> usize {
        debug_assert!(slot_count > 0);
        match self {
            HashStrategy::Poly31 => {
                let mut hash: u32 = 0;
                for b in key.bytes() {
                    hash = hash.wrapping_mul(31).wrapping_add(u32::from(b));
                }
                hash as usize % slot_count
            }
            HashStrategy::Djb2 => {
                let mut hash: u32 = 5381;
                for b in key.bytes() {
                    hash = hash.wrapping_mul(33).wrapping_add(u32::from(b));
                }
                hash as usize % slot_count
            }
            HashStrategy::Xxh64 => (xxh64(key.as_bytes(), 0) % slot_count as u64) as usize,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HashStrategy::Poly31 => "poly31",
            HashStrategy::Djb2 => "djb2",
            HashStrategy::Xxh64 => "xxh64",
        }
    }
}

impl fmt::Display for HashStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashStrategy {
    type Err = StrategyError;

    /// Accepts the strategy names and the numeric selectors of the legacy
    /// command line (`-h1`, `-h2`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "poly31" | "1" => Ok(HashStrategy::Poly31),
            "djb2" | "2" => Ok(HashStrategy::Djb2),
            "xxh64" | "3" => Ok(HashStrategy::Xxh64),
            _ => Err(StrategyError(s.to_string())),
        }
    }
}
