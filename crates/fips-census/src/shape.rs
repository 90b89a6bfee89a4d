//! Local table shaper.
//!
//! Turns a fetched table (`State, County, Name, <variables>`) into the
//! canonical county layout (`fips_code, County Name, State Name,
//! <variables>`), drops Puerto Rico, checks the county count, and rewrites
//! the file in place.

use std::path::{Path, PathBuf};

use fips_ingest::{read_local_table, write_table_atomic};
use fips_model::{
    COUNTY_HEADER, COUNTY_NAME, EXCLUDED_STATE, EXPECTED_COUNTY_COUNT, FIPS_CODE, FipsCode,
    NAME_HEADER, STATE_HEADER, STATE_NAME,
};
use polars::prelude::*;
use tracing::info;

use crate::error::{CensusError, Result};

/// Separator between county and state in the vendor name field.
pub const NAME_SEPARATOR: &str = ", ";

/// Shaping policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeOptions {
    /// Required row count after filtering.
    pub expected_rows: usize,
    /// Rows whose state name equals this are removed.
    pub excluded_state: String,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            expected_rows: EXPECTED_COUNTY_COUNT,
            excluded_state: EXCLUDED_STATE.to_string(),
        }
    }
}

/// Outcome of shaping a table file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeSummary {
    pub path: PathBuf,
    /// Rows kept.
    pub rows: usize,
    /// Rows removed by the state filter.
    pub removed_rows: usize,
}

/// Shapes `path` in place with the default policy.
pub fn shape_county_table(path: &Path, variables: &[String]) -> Result<ShapeSummary> {
    shape_county_table_with(path, variables, &ShapeOptions::default())
}

/// Shapes `path` in place.
///
/// The file is only replaced once every check has passed; on failure it
/// keeps its previous content.
pub fn shape_county_table_with(
    path: &Path,
    variables: &[String],
    options: &ShapeOptions,
) -> Result<ShapeSummary> {
    let df = read_local_table(path, &[STATE_HEADER, COUNTY_HEADER])?;
    let input_rows = df.height();

    let mut shaped = shape_frame(df, variables, options)?;
    write_table_atomic(&mut shaped, path)?;

    let summary = ShapeSummary {
        path: path.to_path_buf(),
        rows: shaped.height(),
        removed_rows: input_rows - shaped.height(),
    };
    info!(
        path = %path.display(),
        rows = summary.rows,
        removed_rows = summary.removed_rows,
        "table has been modified and saved"
    );
    Ok(summary)
}

/// Applies the shaping steps to an in-memory frame.
pub fn shape_frame(
    mut df: DataFrame,
    variables: &[String],
    options: &ShapeOptions,
) -> Result<DataFrame> {
    let fips = derive_fips(&df)?;
    let (county_names, state_names) = split_names(&df)?;

    df.with_column(Column::new(FIPS_CODE.into(), fips))?;
    df.with_column(Column::new(COUNTY_NAME.into(), county_names))?;
    df.with_column(Column::new(STATE_NAME.into(), state_names))?;

    let keep: Vec<&str> = [FIPS_CODE, COUNTY_NAME, STATE_NAME]
        .into_iter()
        .chain(variables.iter().map(String::as_str))
        .collect();
    if let Some(missing) = keep.iter().find(|column| df.column(column).is_err()) {
        return Err(CensusError::MissingColumn {
            column: (*missing).to_string(),
        });
    }
    let df = df.select(keep)?;

    let mask: BooleanChunked = df
        .column(STATE_NAME)?
        .str()?
        .into_iter()
        .map(|state| state != Some(options.excluded_state.as_str()))
        .collect();
    let df = df.filter(&mask)?;

    if df.height() != options.expected_rows {
        return Err(CensusError::RowCount {
            expected: options.expected_rows,
            actual: df.height(),
        });
    }

    Ok(df)
}

fn text_column(df: &DataFrame, name: &str) -> Result<StringChunked> {
    let column = df
        .column(name)
        .map_err(|_| CensusError::MissingColumn {
            column: name.to_string(),
        })?
        .cast(&DataType::String)?;
    Ok(column.str()?.clone())
}

/// Zero-padded state (2) + county (3) codes.
fn derive_fips(df: &DataFrame) -> Result<Vec<String>> {
    let states = text_column(df, STATE_HEADER)?;
    let counties = text_column(df, COUNTY_HEADER)?;

    states
        .iter()
        .zip(counties.iter())
        .enumerate()
        .map(|(row, (state, county))| {
            let state = state.ok_or_else(|| CensusError::NullCode {
                column: STATE_HEADER.to_string(),
                row,
            })?;
            let county = county.ok_or_else(|| CensusError::NullCode {
                column: COUNTY_HEADER.to_string(),
                row,
            })?;
            Ok(FipsCode::from_parts(state, county)?.into_string())
        })
        .collect()
}

/// Splits `"<county>, <state>"` into its two halves.
fn split_names(df: &DataFrame) -> Result<(Vec<String>, Vec<String>)> {
    let names = text_column(df, NAME_HEADER)?;
    let mut counties = Vec::with_capacity(names.len());
    let mut states = Vec::with_capacity(names.len());

    for (row, value) in names.iter().enumerate() {
        let value = value.unwrap_or_default();
        let parts: Vec<&str> = value.split(NAME_SEPARATOR).collect();
        let [county, state] = parts.as_slice() else {
            return Err(CensusError::NameSplit {
                row,
                value: value.to_string(),
            });
        };
        counties.push((*county).to_string());
        states.push((*state).to_string());
    }

    Ok((counties, states))
}
