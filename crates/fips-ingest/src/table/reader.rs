//! CSV file reading with tolerant decoding and text-forced columns.

use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use encoding_rs::{UTF_8, WINDOWS_1252};
use fips_model::FIPS_CODE;
use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Decodes file bytes as UTF-8, falling back to Windows-1252.
///
/// Windows-1252 is a superset of Latin-1, so every byte sequence decodes
/// and extended Latin place names (e.g. `Bayamón`) survive either way.
pub fn decode_bytes(bytes: &[u8]) -> Cow<'_, str> {
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        return text;
    }
    tracing::debug!("input is not valid UTF-8, decoding as windows-1252");
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Reads the header row of already-decoded CSV text.
fn header_names(text: &str, path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers().map_err(|e| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(headers.iter().map(str::to_string).collect())
}

/// Reads a local CSV table into a Polars DataFrame.
///
/// Columns named in `text_columns` are loaded as strings so codes such as
/// `"01"` keep their leading zeros; every other column is inferred over the
/// full file. Names in `text_columns` that the file does not contain are
/// ignored here and surface later as missing-column errors where they matter.
pub fn read_local_table(path: &Path, text_columns: &[&str]) -> Result<DataFrame> {
    let bytes = read_bytes(path)?;
    let decoded = decode_bytes(&bytes);
    let text = decoded.strip_prefix('\u{feff}').unwrap_or(&*decoded);

    if text.trim().is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let headers = header_names(text, path)?;
    let schema: Schema = text_columns
        .iter()
        .filter(|name| headers.iter().any(|header| header == *name))
        .map(|name| Field::new((*name).into(), DataType::String))
        .collect();

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_schema_overwrite(Some(Arc::new(schema)))
        .into_reader_with_file_handle(Cursor::new(text.as_bytes().to_vec()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded local table"
    );

    Ok(df)
}

/// Reads a canonical county table, keeping `fips_code` as text.
pub fn read_county_table(path: &Path) -> Result<DataFrame> {
    read_local_table(path, &[FIPS_CODE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_text_columns_keep_leading_zeros() {
        let file = create_temp_csv(b"State,County,Value\n01,001,12\n06,037,7\n");
        let df = read_local_table(file.path(), &["State", "County"]).unwrap();

        let state = df.column("State").unwrap().str().unwrap();
        let county = df.column("County").unwrap().str().unwrap();
        assert_eq!(state.get(0), Some("01"));
        assert_eq!(county.get(1), Some("037"));
        assert!(df.column("Value").unwrap().dtype().is_integer());
    }

    #[test]
    fn test_unknown_text_columns_are_ignored() {
        let file = create_temp_csv(b"a,b\n1,2\n");
        let df = read_local_table(file.path(), &["missing"]).unwrap();
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_latin1_bytes_decode() {
        // "Bayamón" with ó as the single Latin-1 byte 0xF3.
        let file = create_temp_csv(b"Name\n\"Bayam\xf3n Municipio, Puerto Rico\"\n");
        let df = read_local_table(file.path(), &[]).unwrap();

        let name = df.column("Name").unwrap().str().unwrap();
        assert_eq!(name.get(0), Some("Bayamón Municipio, Puerto Rico"));
    }

    #[test]
    fn test_utf8_bytes_decode() {
        let file = create_temp_csv("Name\n\"Bayamón Municipio, Puerto Rico\"\n".as_bytes());
        let df = read_local_table(file.path(), &[]).unwrap();

        let name = df.column("Name").unwrap().str().unwrap();
        assert_eq!(name.get(0), Some("Bayamón Municipio, Puerto Rico"));
    }

    #[test]
    fn test_bom_is_stripped() {
        let file = create_temp_csv("\u{feff}fips_code,x\n01001,1\n".as_bytes());
        let df = read_county_table(file.path()).unwrap();

        let fips = df.column(FIPS_CODE).unwrap().str().unwrap();
        assert_eq!(fips.get(0), Some("01001"));
    }

    #[test]
    fn test_empty_file() {
        let file = create_temp_csv(b"");
        let result = read_local_table(file.path(), &[]);
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = read_local_table(Path::new("/nonexistent/table.csv"), &[]);
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
