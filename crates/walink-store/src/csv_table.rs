use crate::error::{Result, StoreError};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::iter;
use std::path::Path;
use tempfile::NamedTempFile;
use walink_core::domain::Table;

/// Parses a CSV document with a header row. Cells stay text.
///
/// Rows shorter than the header are kept short; their missing cells read as
/// absent. Rows longer than the header are rejected.
pub fn read_table_from<R: Read>(reader: R) -> csv::Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "record on line {line} has {} fields, but the header has {}",
                    record.len(),
                    headers.len()
                ),
            )
            .into());
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(Table::new(headers, rows))
}

pub fn write_table_to<W: Write>(writer: W, table: &Table) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    writer.write_record(&table.headers)?;

    let width = table.headers.len();
    for row in &table.rows {
        let padding = width.saturating_sub(row.len());
        writer.write_record(
            row.iter()
                .map(String::as_str)
                .chain(iter::repeat("").take(padding)),
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_table(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|err| StoreError::read(path, err))?;
    read_table_from(file).map_err(|err| StoreError::read(path, err))
}

/// Replaces `path` with `table` in one rename.
///
/// The table is written to a sibling temp file first, so a failure at any
/// point leaves the existing file untouched.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(parent).map_err(|err| StoreError::write(path, err))?;
    write_table_to(temp.as_file_mut(), table).map_err(|err| StoreError::write(path, err))?;
    temp.as_file()
        .sync_all()
        .map_err(|err| StoreError::write(path, err))?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions())
            .map_err(|err| StoreError::write(path, err))?;
    }

    temp.persist(path)
        .map_err(|err| StoreError::write(path, err.error))?;
    Ok(())
}
