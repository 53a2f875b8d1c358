use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid input directory: {0}")]
    InvalidInputDir(PathBuf),
    #[error("failed to list input directory {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read table {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to write table {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("invalid backup path (matches input): {0}")]
    InvalidBackupPath(PathBuf),
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Io,
    InvalidInputDir,
    List,
    Read,
    Write,
    InvalidBackupPath,
    InvalidTimestamp,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Io(_) => StoreErrorKind::Io,
            StoreError::InvalidInputDir(_) => StoreErrorKind::InvalidInputDir,
            StoreError::List { .. } => StoreErrorKind::List,
            StoreError::Read { .. } => StoreErrorKind::Read,
            StoreError::Write { .. } => StoreErrorKind::Write,
            StoreError::InvalidBackupPath(_) => StoreErrorKind::InvalidBackupPath,
            StoreError::InvalidTimestamp(_) => StoreErrorKind::InvalidTimestamp,
        }
    }

    pub(crate) fn read(path: &std::path::Path, source: impl Into<csv::Error>) -> Self {
        StoreError::Read {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub(crate) fn write(path: &std::path::Path, source: impl Into<csv::Error>) -> Self {
        StoreError::Write {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}
