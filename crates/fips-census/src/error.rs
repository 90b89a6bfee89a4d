//! Error types for census fetching and shaping.

use std::path::PathBuf;

use fips_ingest::IngestError;
use fips_model::ModelError;
use thiserror::Error;

/// Errors that can occur while fetching or shaping census tables.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CensusError {
    // =========================================================================
    // SERIES / CONFIGURATION ERRORS
    // =========================================================================
    /// No variables were requested.
    #[error("no variables requested, cannot detect series")]
    NoVariables,

    /// Variable does not start with letters.
    #[error("variable {variable} does not start with letters, cannot detect series")]
    InvalidVariableFormat {
        /// The offending variable name.
        variable: String,
    },

    /// Variables from different series in one request.
    #[error("variables must be of the same series: {variable} is {found}, expected {expected}")]
    MixedSeries {
        /// Series of the first variable.
        expected: String,
        /// Series of the offending variable.
        found: String,
        /// The offending variable name.
        variable: String,
    },

    /// Series has no URL sub-path configured.
    #[error("series {series} not recognized, add it to the series table")]
    UnknownSeries {
        /// The unrecognized series tag.
        series: String,
    },

    /// API key file could not be read.
    #[error("API key file {path} could not be read: {source}")]
    CredentialMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // TRANSPORT ERRORS
    // =========================================================================
    /// Network request failed.
    #[error("network error: {0}")]
    Network(String),

    /// Vendor answered with a non-success status.
    #[error("request failed with status code {status}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
    },

    /// Response body is not a JSON array of rows.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A requested column is absent from the response header.
    #[error("column {column} missing from response header")]
    MissingResponseColumn {
        /// The requested column name.
        column: String,
    },

    /// A data row is shorter than the response header.
    #[error("response row {row} has {found} values, header has {expected}")]
    RaggedRow {
        /// Zero-based data row index.
        row: usize,
        /// Header width.
        expected: usize,
        /// Row width.
        found: usize,
    },

    // =========================================================================
    // SHAPING ERRORS
    // =========================================================================
    /// Expected column is absent from the local table.
    #[error("{column} not in table, check again")]
    MissingColumn {
        /// The missing column name.
        column: String,
    },

    /// State or county code is null.
    #[error("{column} is empty in row {row}")]
    NullCode {
        /// The code column.
        column: String,
        /// Zero-based row index.
        row: usize,
    },

    /// Name field does not split into county and state.
    #[error("name '{value}' in row {row} does not split into county and state")]
    NameSplit {
        /// Zero-based row index.
        row: usize,
        /// The unsplittable value.
        value: String,
    },

    /// Shaped row count differs from the canonical county count.
    #[error("{actual} instead of {expected} counties in table, check again")]
    RowCount {
        /// Expected row count.
        expected: usize,
        /// Actual row count after filtering.
        actual: usize,
    },

    // =========================================================================
    // WRAPPED ERRORS
    // =========================================================================
    /// Identifier validation failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Local table I/O failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame {
        /// Polars error message.
        message: String,
    },
}

impl CensusError {
    /// Returns true for errors raised before any network call is made.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NoVariables
                | Self::InvalidVariableFormat { .. }
                | Self::MixedSeries { .. }
                | Self::UnknownSeries { .. }
                | Self::CredentialMissing { .. }
        )
    }
}

impl From<reqwest::Error> for CensusError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for CensusError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<polars::prelude::PolarsError> for CensusError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type alias for census operations.
pub type Result<T> = std::result::Result<T, CensusError>;
