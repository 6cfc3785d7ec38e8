use crate::{RecordId, ResidentRecord, Transition};
use std::collections::HashMap;

/// Live version per record id
#[derive(Debug, Clone, Default)]
pub struct LineageIndex {
    records: HashMap<RecordId, ResidentRecord>,
}

impl LineageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self, record_id: &RecordId) -> Option<&ResidentRecord> {
        self.records.get(record_id)
    }

    pub fn contains(&self, record_id: &RecordId) -> bool {
        self.records.contains_key(record_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Retire consumed versions and make produced ones live
    ///
    /// Callers apply only transitions that were accepted and matched the live state.
    pub fn apply(&mut self, tx: &Transition) {
        for record in &tx.consumed {
            self.records.remove(&record.record_id);
        }
        for record in &tx.produced {
            self.records.insert(record.record_id, record.clone());
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &ResidentRecord> {
        self.records.values()
    }
}
