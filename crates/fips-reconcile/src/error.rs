//! Error types for normalization and reconciliation.

use fips_model::ModelError;
use thiserror::Error;

/// Errors raised before or during a reconciliation.
///
/// Unmatched counties are not errors; they are reported through
/// [`crate::ReconcileReport`].
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A table lacks the canonical identifier column.
    #[error("{table} table has no '{column}' column")]
    MissingFipsColumn { table: String, column: String },

    /// A mapping key or identifier source column is absent.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// An identifier cell is empty.
    #[error("FIPS code missing in row {row}")]
    NullFips { row: usize },

    /// An identifier does not have five characters after padding.
    #[error("invalid FIPS code in row {row}: {source}")]
    InvalidFips {
        row: usize,
        #[source]
        source: ModelError,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ReconcileError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
