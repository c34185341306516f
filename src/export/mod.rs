use std::path::Path;
use csv::WriterBuilder;
use crate::record::Record;
use crate::store::StoreError;

/// Column order of exported files, matching the on-screen history table
pub(crate) const EXPORT_HEADER: [&str; 5] = ["date", "type", "category", "amount", "note"];

/// Export records to a csv file, replacing it if it exists
pub(crate) fn export_records<'a, I>(records: I, file_path: &Path) -> Result<usize, StoreError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_path(file_path)?;
    csv_writer.write_record(EXPORT_HEADER)?;

    let mut count = 0usize;
    for r in records {
        let kind = r.kind.to_string();
        csv_writer.write_record([r.date.as_str(), kind.as_str(), r.category.as_str(), r.amount.as_str(), r.note.as_str()])?;
        count += 1;
    }
    csv_writer.flush()?;

    Ok(count)
}
