use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;

use crate::model::record::Record;
use crate::repository::traits::RecordRepository;

/// Process-local store. Clones share the same list; separate `new()` calls
/// do not.
#[derive(Clone, Default)]
pub struct InMemoryRecordRepository {
    records: Arc<RwLock<Vec<Record>>>,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordRepository for InMemoryRecordRepository {
    fn list(&self) -> Result<Vec<Record>> {
        Ok(self.records.read().clone())
    }

    fn append(&self, record: Record) -> Result<Record> {
        self.records.write().push(record.clone());
        Ok(record)
    }

    fn remove_by_id(&self, id: &str) -> Result<Option<Record>> {
        let mut records = self.records.write();
        Ok(records
            .iter()
            .position(|r| r.id() == Some(id))
            .map(|pos| records.remove(pos)))
    }
}
