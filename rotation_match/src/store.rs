use std::sync::Arc;

use arc_swap::ArcSwap;
use log::debug;

use crate::config::AssignmentRecord;

/// The process-wide record list.
///
/// The list is replaced wholesale on every load. Readers take an immutable
/// snapshot; a reader racing a reload sees either the old or the new list
/// in full, never a partial one.
pub struct RecordStore {
    records: ArcSwap<Vec<AssignmentRecord>>,
}

impl RecordStore {
    pub fn new() -> RecordStore {
        RecordStore {
            records: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Swaps in a freshly loaded record list.
    pub fn replace(&self, records: Vec<AssignmentRecord>) {
        debug!("store: replacing record list with {:?} records", records.len());
        self.records.store(Arc::new(records));
    }

    /// A snapshot of the current record list.
    pub fn all(&self) -> Arc<Vec<AssignmentRecord>> {
        self.records.load_full()
    }
}

impl Default for RecordStore {
    fn default() -> RecordStore {
        RecordStore::new()
    }
}
