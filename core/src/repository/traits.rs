use crate::model::record::Record;
use anyhow::Result;

/// Ordered record storage. Insertion order is the listing order.
pub trait RecordRepository: Send + Sync {
    fn list(&self) -> Result<Vec<Record>>;
    /// Adds to the end and hands the record back untouched.
    fn append(&self, record: Record) -> Result<Record>;
    /// Removes the first record with this id; `None` when nothing matched.
    fn remove_by_id(&self, id: &str) -> Result<Option<Record>>;
}

