use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

const BACKUP_EXTENSION: &str = "bak";

/// `contacts.csv` becomes `contacts.csv.20261015T093000.bak`.
pub fn backup_path(path: &Path, now_utc: i64) -> Result<PathBuf> {
    let stamp = DateTime::<Utc>::from_timestamp(now_utc, 0)
        .ok_or(StoreError::InvalidTimestamp(now_utc))?
        .format("%Y%m%dT%H%M%S");
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::InvalidBackupPath(path.to_path_buf()))?;

    let mut name = file_name.to_owned();
    name.push(format!(".{stamp}.{BACKUP_EXTENSION}"));
    Ok(path.with_file_name(name))
}

/// Copies an input file aside before it is rewritten.
pub fn backup_file(path: &Path, now_utc: i64) -> Result<PathBuf> {
    let target = backup_path(path, now_utc)?;
    if target == path {
        return Err(StoreError::InvalidBackupPath(target));
    }
    fs::copy(path, &target)?;
    Ok(target)
}
