//! Identifier normalizer.

use fips_model::{FIPS_CODE, FipsCode};
use polars::prelude::*;
use tracing::debug;

use crate::error::{ReconcileError, Result};

/// Returns a copy of `df` whose `column` is renamed to `fips_code` and
/// left-padded to five characters.
///
/// Integer and partially padded text identifiers are both accepted. Either
/// every row conforms or the call fails; `df` itself is never modified. A
/// stale `fips_code` column is replaced when `column` names another one.
pub fn normalize_fips(df: &DataFrame, column: &str) -> Result<DataFrame> {
    let raw = df
        .column(column)
        .map_err(|_| ReconcileError::ColumnNotFound {
            column: column.to_string(),
        })?
        .cast(&DataType::String)?;

    let codes = raw
        .str()?
        .iter()
        .enumerate()
        .map(|(row, value)| {
            let value = value.ok_or(ReconcileError::NullFips { row })?;
            FipsCode::normalize(value)
                .map(FipsCode::into_string)
                .map_err(|source| ReconcileError::InvalidFips { row, source })
        })
        .collect::<Result<Vec<_>>>()?;
    let fips = Column::new(FIPS_CODE.into(), codes);

    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .filter_map(|existing| match existing.name().as_str() {
            name if name == column => Some(fips.clone()),
            FIPS_CODE => None,
            _ => Some(existing.clone()),
        })
        .collect();

    debug!(column, rows = df.height(), "FIPS codes normalized");
    Ok(DataFrame::new(columns)?)
}
