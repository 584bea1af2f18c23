use std::sync::Mutex;

use crate::store::{NewRecord, QueryFilter, Record, RecordStore, StoreError, next_id};

/// Record store kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryStore {
    fn append(&self, record: NewRecord) -> Result<Record, StoreError> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        let record = Record {
            id: next_id(&records),
            first: record.first,
            last: record.last,
        };
        records.push(record.clone());
        Ok(record)
    }

    fn query(&self, filter: &QueryFilter) -> Result<Vec<Record>, StoreError> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(records.iter().filter(|r| filter.matches(r)).cloned().collect())
    }
}
