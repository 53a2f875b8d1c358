pub mod backup;
pub mod csv_table;
pub mod error;
pub mod paths;

use crate::error::Result;
use std::path::{Path, PathBuf};
use walink_core::domain::Table;

pub use csv_table::{read_table, read_table_from, write_table, write_table_to};
pub use error::{StoreError, StoreErrorKind};

/// Where tables come from and where processed tables are committed.
pub trait TableStore {
    fn list_inputs(&self) -> Result<Vec<PathBuf>>;
    fn read_table(&self, path: &Path) -> Result<Table>;
    fn write_table(&self, path: &Path, table: &Table) -> Result<()>;
    fn backup_table(&self, path: &Path, now_utc: i64) -> Result<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct CsvDirectory {
    dir: PathBuf,
    extension: String,
}

impl CsvDirectory {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl TableStore for CsvDirectory {
    fn list_inputs(&self) -> Result<Vec<PathBuf>> {
        paths::list_inputs(&self.dir, &self.extension)
    }

    fn read_table(&self, path: &Path) -> Result<Table> {
        csv_table::read_table(path)
    }

    fn write_table(&self, path: &Path, table: &Table) -> Result<()> {
        csv_table::write_table(path, table)
    }

    fn backup_table(&self, path: &Path, now_utc: i64) -> Result<PathBuf> {
        backup::backup_file(path, now_utc)
    }
}
