use crate::error::{Result, StoreError};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Lists files in `dir` (not recursing) whose extension matches, sorted.
///
/// Hidden files are skipped; that also keeps half-written temp files out of
/// a batch.
pub fn list_inputs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(StoreError::InvalidInputDir(dir.to_path_buf()));
    }

    let list_err = |source: std::io::Error| StoreError::List {
        path: dir.to_path_buf(),
        source,
    };
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let path = entry.map_err(list_err)?.path();
        if is_hidden(&path) || !path.is_file() {
            continue;
        }
        if has_extension(&path, extension) {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .is_some_and(|name| name.starts_with('.'))
}
