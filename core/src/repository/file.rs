use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use parking_lot::Mutex;

use crate::model::record::Record;
use crate::repository::traits::RecordRepository;

const DEFAULT_FILE_NAME: &str = "records.json";

/// Durable variant of the store: one JSON array on disk, rewritten on every
/// change.
pub struct FileRecordRepository {
    file_path: PathBuf,
    // serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileRecordRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".drr")
            }
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create data directory {}", path.display()))?;
        path.push(DEFAULT_FILE_NAME);

        if !path.exists() {
            write_records(&path, &[])?;
        }

        tracing::debug!(path = %path.display(), "Using file record store");
        Ok(FileRecordRepository {
            file_path: path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_records(&self) -> Result<Vec<Record>> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Failed to open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let records = serde_json::from_reader(reader)
            .with_context(|| format!("Corrupt record file {}", self.file_path.display()))?;
        Ok(records)
    }
}

fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

impl RecordRepository for FileRecordRepository {
    fn list(&self) -> Result<Vec<Record>> {
        let _guard = self.write_lock.lock();
        self.read_records()
    }

    fn append(&self, record: Record) -> Result<Record> {
        let _guard = self.write_lock.lock();
        let mut records = self.read_records()?;
        records.push(record.clone());
        write_records(&self.file_path, &records)?;
        Ok(record)
    }

    fn remove_by_id(&self, id: &str) -> Result<Option<Record>> {
        let _guard = self.write_lock.lock();
        let mut records = self.read_records()?;
        let Some(pos) = records.iter().position(|r| r.id() == Some(id)) else {
            return Ok(None);
        };
        let removed = records.remove(pos);
        write_records(&self.file_path, &records)?;
        Ok(Some(removed))
    }
}
