use std::collections::VecDeque;

use crate::types::{FastMap, Field, Occurrence};

// ─── Record ─────────────────────────────────────────────────────────────────

/// The accumulated entry for one distinct key: every occurrence inserted
/// under it, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: Field,
    pub occurrences: Vec<Occurrence>,
}

/// One chain. New records go to the front, so iteration order is
/// most-recently-created-key first.
pub type Bucket = VecDeque<Record>;

// ─── Lookup ─────────────────────────────────────────────────────────────────

/// Outcome of a point lookup.
///
/// `comparisons` counts key-equality checks while scanning the chain: the
/// 1-based chain position of the hit, or the whole chain length on a miss
/// (0 for an empty bucket).
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    pub record: Option<&'a Record>,
    pub comparisons: usize,
}

impl Lookup<'_> {
    #[inline]
    pub fn found(&self) -> bool {
        self.record.is_some()
    }

    /// The matched record's occurrences, or an empty slice on a miss.
    pub fn occurrences(&self) -> &[Occurrence] {
        self.record.map(|r| r.occurrences.as_slice()).unwrap_or(&[])
    }
}

// ─── TableStats ─────────────────────────────────────────────────────────────

/// Chain-distribution summary. Per-slot detail comes from
/// [`HashTable::chain_lengths`](super::HashTable::chain_lengths).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStats {
    pub distinct_keys: usize,
    pub occupied_slots: usize,
    pub max_chain: usize,
    /// chain length → number of slots with that length. Empty slots excluded.
    pub histogram: FastMap<usize, usize>,
}
