//! Directory and file helpers used before a table is (re)written.

use std::fs;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Creates `dir` (and parents) when absent. Returns `true` if it was created.
pub fn ensure_directory(dir: &Path) -> Result<bool> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(false);
    }
    tracing::info!(path = %dir.display(), "directory does not exist, creating");
    fs::create_dir_all(dir).map_err(|e| IngestError::Io {
        operation: "create directory",
        path: dir.to_path_buf(),
        source: e,
    })?;
    Ok(true)
}

/// Deletes `path` if it exists. Returns `true` if a file was removed.
pub fn remove_existing(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "existing file found, removed");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(IngestError::Io {
            operation: "remove",
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
