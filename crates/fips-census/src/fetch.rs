//! Remote table fetcher.
//!
//! Pulls one ACS series for all counties, reorders the response columns to
//! `state, county, NAME, <mapping keys>`, renames them, and writes the result
//! to the configured data folder.

use std::path::PathBuf;

use fips_ingest::{ensure_directory, remove_existing, write_rows_atomic};
use fips_model::{COUNTY_VARIABLE, ColumnMapping, NAME_VARIABLE, STATE_VARIABLE, title_case_header};
use serde_json::Value;
use tracing::{info, info_span, warn};

use crate::config::{CensusConfig, redact_key};
use crate::credential::Credential;
use crate::error::{CensusError, Result};
use crate::series::classify_series;
use crate::shape::{ShapeOptions, ShapeSummary, shape_county_table_with};
use crate::transport::{HttpTransport, Transport};

/// Result of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    /// Written table.
    pub path: PathBuf,
    /// Mapped (descriptive) variable names present in the written header.
    pub imported_variables: Vec<String>,
    /// Number of data rows written.
    pub rows: usize,
}

/// Fetches census tables through a [`Transport`].
pub struct CensusFetcher<T = HttpTransport> {
    config: CensusConfig,
    credential: Credential,
    transport: T,
}

impl CensusFetcher<HttpTransport> {
    /// Fetcher reading the key from `config.api_key_file` and using HTTP.
    pub fn http(config: CensusConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        let credential = Credential::File(config.api_key_file.clone());
        Ok(Self::new(config, credential, transport))
    }
}

impl<T: Transport> CensusFetcher<T> {
    pub fn new(config: CensusConfig, credential: Credential, transport: T) -> Self {
        Self {
            config,
            credential,
            transport,
        }
    }

    pub fn config(&self) -> &CensusConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches the mapped variables for every county and writes them to
    /// `data_folder/output_file_name`, replacing any previous file.
    ///
    /// Series and configuration problems fail before the request is sent.
    /// A non-success status fails with [`CensusError::RequestFailed`] and
    /// leaves no file behind.
    pub fn fetch(
        &self,
        mapping: &ColumnMapping,
        year: &str,
        output_file_name: &str,
    ) -> Result<FetchOutput> {
        let span = info_span!("fetch", file = output_file_name, year);
        let _guard = span.enter();

        let variables = request_variables(mapping);
        let series = classify_series(mapping.keys())?;
        let series_path = self.config.series_path(&series)?;
        let key = self.credential.resolve()?;
        let url = self.config.query_url(year, series_path, &variables, &key);

        ensure_directory(&self.config.data_folder)?;
        let path = self.config.output_path(output_file_name);
        remove_existing(&path)?;

        let response = self.transport.get(&url)?;
        if !response.is_success() {
            warn!(
                status = response.status,
                url = %redact_key(&url),
                "request failed"
            );
            return Err(CensusError::RequestFailed {
                status: response.status,
            });
        }

        let table = parse_response(&response.body)?;
        let columns = output_columns(&variables);
        let header = descriptive_headers(&columns, mapping);
        let imported_variables = imported_variables(&header, mapping);
        info!(imported_variables = ?imported_variables, "imported variables");

        let rows = reorder_rows(&table, &columns)?;
        let rows = write_rows_atomic(&path, &header, rows)?;
        info!(path = %path.display(), rows, "data saved");

        Ok(FetchOutput {
            path,
            imported_variables,
            rows,
        })
    }

    /// Fetches with the configured default year.
    pub fn fetch_default_year(
        &self,
        mapping: &ColumnMapping,
        output_file_name: &str,
    ) -> Result<FetchOutput> {
        let year = self.config.year.clone();
        self.fetch(mapping, &year, output_file_name)
    }

    /// Fetches, then shapes the written table in place.
    pub fn fetch_shaped(
        &self,
        mapping: &ColumnMapping,
        year: &str,
        output_file_name: &str,
        options: &ShapeOptions,
    ) -> Result<(FetchOutput, ShapeSummary)> {
        let output = self.fetch(mapping, year, output_file_name)?;
        let summary = shape_county_table_with(&output.path, &output.imported_variables, options)?;
        Ok((output, summary))
    }
}

/// `NAME` followed by the mapping keys in insertion order.
pub fn request_variables(mapping: &ColumnMapping) -> Vec<String> {
    std::iter::once(NAME_VARIABLE)
        .chain(mapping.keys())
        .map(str::to_string)
        .collect()
}

/// `state`, `county`, then the requested variables.
pub fn output_columns(variables: &[String]) -> Vec<String> {
    [STATE_VARIABLE, COUNTY_VARIABLE]
        .into_iter()
        .map(str::to_string)
        .chain(variables.iter().cloned())
        .collect()
}

/// Mapped name for mapping keys, title-cased raw header otherwise.
pub fn descriptive_headers(columns: &[String], mapping: &ColumnMapping) -> Vec<String> {
    columns
        .iter()
        .map(|column| match mapping.get(column) {
            Some(target) => target.to_string(),
            None => title_case_header(column),
        })
        .collect()
}

/// Headers that are mapping targets, in header order.
pub fn imported_variables(header: &[String], mapping: &ColumnMapping) -> Vec<String> {
    header
        .iter()
        .filter(|name| mapping.contains_target(name))
        .cloned()
        .collect()
}

/// Parses the vendor body: a JSON array whose first row is the header.
pub fn parse_response(body: &str) -> Result<Vec<Vec<String>>> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(body)?;
    if rows.is_empty() {
        return Err(CensusError::MalformedResponse(
            "response has no header row".to_string(),
        ));
    }
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(value_to_cell).collect())
        .collect())
}

fn value_to_cell(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Reorders every data row to `columns` by looking each column up in the
/// response header. Rows are reindexed independently of their position in
/// the response, so a vendor-side column reshuffle cannot misalign values.
pub fn reorder_rows(table: &[Vec<String>], columns: &[String]) -> Result<Vec<Vec<String>>> {
    let Some((header, data)) = table.split_first() else {
        return Err(CensusError::MalformedResponse(
            "response has no header row".to_string(),
        ));
    };

    let indices = columns
        .iter()
        .map(|column| {
            header
                .iter()
                .position(|name| name == column)
                .ok_or_else(|| CensusError::MissingResponseColumn {
                    column: column.clone(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    data.iter()
        .enumerate()
        .map(|(row_idx, row)| {
            indices
                .iter()
                .map(|&idx| {
                    row.get(idx).cloned().ok_or_else(|| CensusError::RaggedRow {
                        row: row_idx,
                        expected: header.len(),
                        found: row.len(),
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}
