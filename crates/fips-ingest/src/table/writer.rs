//! Table writing with replace semantics.

use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::error::{IngestError, Result};
use crate::fs::ensure_directory;

/// Sibling temp path: `table.csv` → `table.csv.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("table"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes through `write` into a temp file, syncs it, then renames it over `path`.
///
/// The temp file is removed when any step fails, leaving `path` untouched.
fn replace_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(File, &Path) -> Result<File>,
{
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    let temp_path = temp_path_for(path);
    let result = (|| {
        let file = File::create(&temp_path).map_err(|e| IngestError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;
        let file = write(file, &temp_path)?;
        file.sync_all().map_err(|e| IngestError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;
        drop(file);

        fs::rename(&temp_path, path).map_err(|e| IngestError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        })
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Writes a DataFrame as UTF-8 CSV with a header row, replacing `path`.
pub fn write_table_atomic(df: &mut DataFrame, path: &Path) -> Result<()> {
    replace_atomically(path, |mut file, temp_path| {
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .map_err(|e| IngestError::CsvWrite {
                path: temp_path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(file)
    })?;

    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "table written"
    );
    Ok(())
}

/// Writes raw string rows under `header`, replacing `path`.
pub fn write_rows_atomic<I>(path: &Path, header: &[String], rows: I) -> Result<usize>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut written = 0usize;
    replace_atomically(path, |file, temp_path| {
        let csv_error = |e: csv::Error| IngestError::CsvWrite {
            path: temp_path.to_path_buf(),
            message: e.to_string(),
        };

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(header).map_err(csv_error)?;
        for row in rows {
            writer.write_record(&row).map_err(csv_error)?;
            written += 1;
        }
        writer.into_inner().map_err(|e| IngestError::CsvWrite {
            path: temp_path.to_path_buf(),
            message: e.to_string(),
        })
    })?;

    tracing::info!(path = %path.display(), rows = written, "rows written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_temp_path_is_sibling() {
        let temp = temp_path_for(Path::new("data/population.csv"));
        assert_eq!(temp, PathBuf::from("data/population.csv.tmp"));
    }

    #[test]
    fn test_write_table_replaces_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "old,content\n1,2\n3,4\n").unwrap();

        let mut df = df! {
            "fips_code" => &["01001", "01003"],
            "Value" => &[1i64, 2],
        }
        .unwrap();
        write_table_atomic(&mut df, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "fips_code,Value\n01001,1\n01003,2\n");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_write_rows_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data_uscensus").join("raw.csv");
        let header = vec!["State".to_string(), "Name".to_string()];
        let rows = vec![vec!["01".to_string(), "Autauga County, Alabama".to_string()]];

        let written = write_rows_atomic(&path, &header, rows).unwrap();

        assert_eq!(written, 1);
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "State,Name\n01,\"Autauga County, Alabama\"\n");
    }

    #[test]
    fn test_failed_write_leaves_destination_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keep.csv");
        fs::write(&path, "a\n1\n").unwrap();

        let result = replace_atomically(&path, |_file, temp_path| {
            Err(IngestError::CsvWrite {
                path: temp_path.to_path_buf(),
                message: "boom".to_string(),
            })
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n1\n");
        assert!(!temp_path_for(&path).exists());
    }
}
