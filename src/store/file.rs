//! JSON-file record store
//!
//! The whole record list lives in one file and is rewritten on every append.
//! Appends are serialized behind a mutex so concurrent connections cannot
//! lose updates, and each rewrite goes through a sibling temp file plus a
//! rename so readers never observe a half-written list.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::store::{NewRecord, QueryFilter, Record, RecordStore, StoreError, next_id};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Reads the full list. A missing or empty file is an empty list.
    fn load(&self) -> Result<Vec<Record>, StoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&raw)?)
    }

    fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, serde_json::to_vec(records)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RecordStore for FileStore {
    fn append(&self, record: NewRecord) -> Result<Record, StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;

        let mut records = self.load()?;
        let record = Record {
            id: next_id(&records),
            first: record.first,
            last: record.last,
        };
        records.push(record.clone());
        self.save(&records)?;

        tracing::debug!(id = record.id, path = %self.path.display(), "Record appended");
        Ok(record)
    }

    /// Unreadable or corrupt files read as an empty list.
    fn query(&self, filter: &QueryFilter) -> Result<Vec<Record>, StoreError> {
        let records = self.load().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Store unreadable, treating as empty");
            Vec::new()
        });

        Ok(records.into_iter().filter(|r| filter.matches(r)).collect())
    }
}
