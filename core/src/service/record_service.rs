use crate::model::draft::RecordDraft;
use crate::model::record::Record;
use crate::repository::RecordRepository;
use anyhow::Result;
use uuid::Uuid;

pub struct RecordService<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> RecordService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates the form, derives its fields and stores it under a fresh id.
    ///
    /// A `ValidationError` is returned (inside the `anyhow::Error`) before the
    /// repository is touched.
    pub fn submit(&self, draft: &RecordDraft) -> Result<Record> {
        let valid = draft.validate()?;
        let record = valid.into_record(Uuid::new_v4().to_string());
        let stored = self.repo.append(record)?;
        tracing::info!(id = stored.id().unwrap_or_default(), "Record submitted");
        Ok(stored)
    }

    pub fn list(&self) -> Result<Vec<Record>> {
        self.repo.list()
    }

    pub fn delete(&self, id: &str) -> Result<Option<Record>> {
        let removed = self.repo.remove_by_id(id)?;
        if removed.is_none() {
            tracing::debug!(id, "Nothing to delete");
        }
        Ok(removed)
    }
}
