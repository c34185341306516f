use crate::record::Record;
use crate::store::{RecordStore, StoreError};

/// Ledger held in memory, for tests that don't need the file system
#[derive(Default)]
pub(crate) struct MemoryStore {
    records: Vec<Record>,
    /// When set every write fails, to exercise error paths
    read_only: bool,
}

impl MemoryStore {
    pub(crate) fn with_records(records: Vec<Record>) -> MemoryStore {
        MemoryStore { records, read_only: false }
    }

    pub(crate) fn read_only(records: Vec<Record>) -> MemoryStore {
        MemoryStore { records, read_only: true }
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only store")));
        }
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Vec<Record> {
        self.records.clone()
    }

    fn write_all(&mut self, records: &[Record]) -> Result<(), StoreError> {
        self.check_writable()?;
        self.records = records.to_vec();
        Ok(())
    }

    fn append(&mut self, record: &Record) -> Result<(), StoreError> {
        self.check_writable()?;
        self.records.push(record.clone());
        Ok(())
    }
}
