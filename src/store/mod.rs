//! Record storage
//!
//! Handlers only see the [`RecordStore`] trait: append a record, query
//! records through a filter. The on-disk encoding lives in [`file`]; the
//! in-memory store in [`memory`] backs tests.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored person: an assigned number plus first and last name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique id, `1` for the first record, previous max + 1 after that
    #[serde(rename = "number")]
    pub id: u64,
    pub first: String,
    pub last: String,
}

/// Fields of a record before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub first: String,
    pub last: String,
}

/// Requested record number.
///
/// Any base-10 integer is a valid request; one that no id can take
/// (negative, or past `u64::MAX`) is kept as `OutOfRange` and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFilter {
    Id(u64),
    OutOfRange,
}

impl NumberFilter {
    pub fn matches(self, id: u64) -> bool {
        self == NumberFilter::Id(id)
    }
}

/// Listing filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub number: Option<NumberFilter>,
    pub first: Option<String>,
    pub last: Option<String>,
}

impl QueryFilter {
    pub fn matches(&self, record: &Record) -> bool {
        self.number.is_none_or(|n| n.matches(record.id))
            && self.first.as_deref().is_none_or(|f| f == record.first)
            && self.last.as_deref().is_none_or(|l| l == record.last)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt store file: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Durable append/query over the ordered record list.
pub trait RecordStore: Send + Sync {
    /// Appends a record, assigning it the next id.
    fn append(&self, record: NewRecord) -> Result<Record, StoreError>;

    /// Returns matching records in creation order.
    fn query(&self, filter: &QueryFilter) -> Result<Vec<Record>, StoreError>;
}

/// Id for the next record appended after `records`.
pub(crate) fn next_id(records: &[Record]) -> u64 {
    records.iter().map(|r| r.id).max().unwrap_or(0) + 1
}
