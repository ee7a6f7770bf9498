use std::num::NonZeroUsize;

use crate::hash::HashStrategy;
use crate::types::{FastMap, Field, Occurrence};

use super::types::{Bucket, Lookup, Record, TableStats};

pub const DEFAULT_SLOTS: usize = 64;

// ─── TableConfig ────────────────────────────────────────────────────────────

/// Configuration for [`HashTable::new`].
#[derive(Debug, Clone, Copy)]
pub struct TableConfig {
    /// Number of chains. Fixed for the table's lifetime: the table never
    /// resizes, growth only deepens the chains.
    pub slots: NonZeroUsize,
    pub strategy: HashStrategy,
    /// `true`: rows re-using a key accumulate as extra occurrences under one
    /// record. `false`: the latest row replaces the key's previous
    /// occurrences (last write wins).
    pub merge_duplicates: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            slots: NonZeroUsize::new(DEFAULT_SLOTS).unwrap(),
            strategy: HashStrategy::default(),
            merge_duplicates: true,
        }
    }
}

// ─── HashTable ──────────────────────────────────────────────────────────────

/// Fixed-size chained hash table mapping keys to their accumulated
/// occurrences.
///
/// The table exclusively owns its buckets, records and occurrences; dropping
/// it releases everything. Lookups never mutate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTable {
    slots: Vec<Bucket>,
    strategy: HashStrategy,
    merge_duplicates: bool,
    distinct_keys: usize,
}

impl HashTable {
    pub fn new(config: TableConfig) -> Self {
        Self {
            slots: vec![Bucket::new(); config.slots.get()],
            strategy: config.strategy,
            merge_duplicates: config.merge_duplicates,
            distinct_keys: 0,
        }
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn strategy(&self) -> HashStrategy {
        self.strategy
    }

    /// Number of distinct keys inserted so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.distinct_keys
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distinct_keys == 0
    }

    /// Insert one row's worth of data.
    ///
    /// A key seen for the first time gets a fresh record prepended to its
    /// bucket (O(1), never reorders existing records). A key already present
    /// either accumulates the occurrence or replaces its previous ones,
    /// depending on the `merge_duplicates` setting. Either way no bucket ever
    /// holds two records with the same key.
    pub fn insert(&mut self, key: Field, occurrence: Occurrence) {
        let index = self.strategy.index(&key, self.slots.len());
        let bucket = &mut self.slots[index];

        if let Some(record) = bucket.iter_mut().find(|r| r.key == key) {
            if self.merge_duplicates {
                record.occurrences.push(occurrence);
            } else {
                record.occurrences = vec![occurrence];
            }
            return;
        }

        bucket.push_front(Record {
            key,
            occurrences: vec![occurrence],
        });
        self.distinct_keys += 1;
    }

    /// Point lookup. Absence is a normal outcome, not an error.
    pub fn search(&self, key: &str) -> Lookup<'_> {
        let index = self.strategy.index(key, self.slots.len());
        let mut comparisons = 0;
        for record in &self.slots[index] {
            comparisons += 1;
            if record.key == key {
                return Lookup {
                    record: Some(record),
                    comparisons,
                };
            }
        }
        Lookup {
            record: None,
            comparisons,
        }
    }

    /// Records in persistence order: slot 0..n, head-first within each chain.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.slots.iter().flat_map(|bucket| bucket.iter())
    }

    /// Chain length of every slot, in slot order.
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.slots.iter().map(|bucket| bucket.len()).collect()
    }

    /// Summarize how keys spread across the slots.
    pub fn stats(&self) -> TableStats {
        let mut histogram: FastMap<usize, usize> = FastMap::default();
        let mut occupied_slots = 0;
        let mut max_chain = 0;
        for bucket in &self.slots {
            let len = bucket.len();
            if len == 0 {
                continue;
            }
            occupied_slots += 1;
            max_chain = max_chain.max(len);
            *histogram.entry(len).or_insert(0) += 1;
        }
        TableStats {
            distinct_keys: self.distinct_keys,
            occupied_slots,
            max_chain,
            histogram,
        }
    }
}
