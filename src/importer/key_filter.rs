// ==========================================
// gSSURGO Merge - Unique Key Filter
// ==========================================
// Tracks already-seen primary keys for the shared lookup tables so that
// lookup definitions replicated in every survey export land in the store
// exactly once per run.
// ==========================================

use std::collections::{HashMap, HashSet};

use crate::domain::value::KeyValue;

/// Per-table sets of already-inserted primary keys. Scoped to one run;
/// grows monotonically; never shared across tables.
#[derive(Debug, Default)]
pub struct UniqueKeyFilter {
    sets: HashMap<String, HashSet<KeyValue>>,
}

impl UniqueKeyFilter {
    pub fn new() -> UniqueKeyFilter {
        UniqueKeyFilter::default()
    }

    /// Whether `key` was already recorded for `table`.
    pub fn seen(&self, table: &str, key: &KeyValue) -> bool {
        self.sets
            .get(table)
            .map(|set| set.contains(key))
            .unwrap_or(false)
    }

    /// Record a key for a table.
    pub fn record(&mut self, table: &str, key: KeyValue) {
        self.sets.entry(table.to_string()).or_default().insert(key);
    }

    /// Record the key if unseen; returns true when the caller should keep
    /// the row.
    pub fn check_and_record(&mut self, table: &str, key: KeyValue) -> bool {
        if self.seen(table, &key) {
            return false;
        }
        self.record(table, key);
        true
    }
}
