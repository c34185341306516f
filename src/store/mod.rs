#[cfg(test)]
mod memory;

use std::{fmt, fs, io};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::{debug, error, info, warn};

use crate::record::{Kind, Record};

#[cfg(test)]
pub(crate) use memory::MemoryStore;

/// Column header of the ledger file. `kind` is persisted under `type`.
pub(crate) const HEADER: [&str; 5] = ["amount", "category", "note", "date", "type"];

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Csv(csv::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "ledger i/o error: {e}"),
            StoreError::Csv(e) => write!(f, "ledger csv error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<csv::Error> for StoreError {
    fn from(e: csv::Error) -> Self {
        StoreError::Csv(e)
    }
}

/// Persistence contract of the ledger: full read, full overwrite and single-row append.
pub(crate) trait RecordStore {
    /// Never fails. A missing store is an empty ledger and a read fault is logged and yields nothing.
    fn load(&self) -> Vec<Record>;

    fn write_all(&mut self, records: &[Record]) -> Result<(), StoreError>;

    fn append(&mut self, record: &Record) -> Result<(), StoreError>;
}

/// Ledger kept in a single csv file
pub(crate) struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Open the ledger at `path`, creating it with just the header row when absent
    pub(crate) fn open<P: Into<PathBuf>>(path: P) -> Result<CsvStore, StoreError> {
        let mut store = CsvStore { path: path.into() };
        if !store.path.exists() {
            info!("Creating ledger file {}", store.path.display());
            store.write_all(&[])?;
        }
        Ok(store)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for CsvStore {
    fn load(&self) -> Vec<Record> {
        match read_records(&self.path) {
            Ok(records) => records,
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Ledger file {} does not exist", self.path.display());
                vec![]
            }
            Err(e) => {
                error!("Unable to read ledger {}: {}", self.path.display(), e);
                vec![]
            }
        }
    }

    fn write_all(&mut self, records: &[Record]) -> Result<(), StoreError> {
        let mut wtr = WriterBuilder::new().has_headers(false).from_path(&self.path)?;
        wtr.write_record(HEADER)?;
        for r in records {
            wtr.serialize(r)?;
        }
        wtr.flush()?;
        debug!("Rewrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    fn append(&mut self, record: &Record) -> Result<(), StoreError> {
        // Write the header first if the file vanished or was truncated since open
        let needs_header = fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
        if needs_header {
            wtr.write_record(HEADER)?;
        }
        wtr.serialize(record)?;
        wtr.flush()?;
        Ok(())
    }
}

/// Position of each known column in the file's header row
struct HeaderIndex {
    amount: Option<usize>,
    category: Option<usize>,
    note: Option<usize>,
    date: Option<usize>,
    kind: Option<usize>,
}

impl HeaderIndex {
    fn parse(headers: &StringRecord) -> HeaderIndex {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);
        let index = HeaderIndex {
            amount: position(HEADER[0]),
            category: position(HEADER[1]),
            note: position(HEADER[2]),
            date: position(HEADER[3]),
            kind: position(HEADER[4]),
        };

        if !headers.is_empty() && (index.amount.is_none() || index.date.is_none() || index.kind.is_none()) {
            warn!("Ledger header {:?} is missing expected columns, absent fields read as empty", headers);
        }
        index
    }

    fn record(&self, row: &StringRecord) -> Record {
        // Short rows are tolerated: a missing field reads as an empty string
        let field = |i: Option<usize>| i.and_then(|i| row.get(i)).unwrap_or("").to_string();
        Record {
            amount: field(self.amount),
            category: field(self.category),
            note: field(self.note),
            date: field(self.date),
            kind: Kind::from(field(self.kind)),
        }
    }
}

fn read_records(path: &Path) -> Result<Vec<Record>, StoreError> {
    let file = fs::File::open(path)?;
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(file);
    let index = HeaderIndex::parse(rdr.headers()?);

    let mut records = vec![];
    for row in rdr.records() {
        records.push(index.record(&row?));
    }

    Ok(records)
}
