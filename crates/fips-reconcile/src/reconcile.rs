//! Cross-source reconciler.
//!
//! Secondary tables are subset and renamed through a [`ColumnMapping`] and
//! left-joined onto the canonical county table. Every canonical row survives
//! the join, in its original order; gaps are reported, never raised.

use std::collections::HashSet;

use fips_model::{ColumnMapping, FIPS_CODE};
use polars::prelude::*;
use tracing::{debug, info_span};

use crate::error::{ReconcileError, Result};
use crate::report::ReconcileReport;

const ROW_INDEX: &str = "__canonical_row";

/// Joined table plus its diagnostics.
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub table: DataFrame,
    pub report: ReconcileReport,
}

/// A named secondary table for [`reconcile_all`].
#[derive(Debug, Clone)]
pub struct SourceSpec {
    pub name: String,
    /// Already FIPS-normalized table.
    pub table: DataFrame,
    pub mapping: ColumnMapping,
}

impl SourceSpec {
    pub fn new(name: impl Into<String>, table: DataFrame, mapping: ColumnMapping) -> Self {
        Self {
            name: name.into(),
            table,
            mapping,
        }
    }
}

/// Wide table built from several sources.
#[derive(Debug, Clone)]
pub struct ReconciledAll {
    pub table: DataFrame,
    /// One report per source, in input order.
    pub reports: Vec<(String, ReconcileReport)>,
}

/// Left-joins the mapped columns of `secondary` onto `counties`.
///
/// Both tables must carry `fips_code`; this is checked before anything
/// else. Mapping keys select the secondary columns and their values rename
/// them. Secondary identifiers matching several rows multiply the canonical
/// row, as any left join does.
pub fn reconcile(
    secondary: &DataFrame,
    mapping: &ColumnMapping,
    counties: &DataFrame,
) -> Result<Reconciled> {
    require_fips(counties, "canonical")?;
    require_fips(secondary, "secondary")?;

    let subset = select_mapped(secondary, mapping)?;
    let missing_fips = missing_fips(counties, &subset)?;

    let table = counties
        .clone()
        .lazy()
        .with_row_index(ROW_INDEX, None)
        .with_column(col(FIPS_CODE).cast(DataType::String))
        .join(
            subset.lazy().with_column(col(FIPS_CODE).cast(DataType::String)),
            [col(FIPS_CODE)],
            [col(FIPS_CODE)],
            JoinArgs::new(JoinType::Left),
        )
        .sort(
            [ROW_INDEX],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?
        .drop(ROW_INDEX)?;

    let null_counts = table
        .get_columns()
        .iter()
        .map(|column| Ok((column.name().to_string(), missing_values(column)?)))
        .collect::<Result<Vec<_>>>()?;

    let report = ReconcileReport {
        canonical_rows: counties.height(),
        missing_fips,
        null_counts,
    };
    debug!(
        rows = table.height(),
        missing = report.missing_count(),
        "secondary table joined"
    );
    Ok(Reconciled { table, report })
}

/// Folds every source onto `counties` in order, logging each report.
pub fn reconcile_all(counties: &DataFrame, sources: &[SourceSpec]) -> Result<ReconciledAll> {
    let mut table = counties.clone();
    let mut reports = Vec::with_capacity(sources.len());

    for source in sources {
        let span = info_span!("reconcile", source = %source.name);
        let _guard = span.enter();

        let reconciled = reconcile(&source.table, &source.mapping, &table)?;
        reconciled.report.log(&source.name);
        table = reconciled.table;
        reports.push((source.name.clone(), reconciled.report));
    }

    Ok(ReconciledAll { table, reports })
}

fn require_fips(df: &DataFrame, table: &str) -> Result<()> {
    if df.column(FIPS_CODE).is_err() {
        return Err(ReconcileError::MissingFipsColumn {
            table: table.to_string(),
            column: FIPS_CODE.to_string(),
        });
    }
    Ok(())
}

/// `fips_code` followed by the mapped columns under their new names.
fn select_mapped(secondary: &DataFrame, mapping: &ColumnMapping) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(mapping.len() + 1);
    columns.push(secondary.column(FIPS_CODE)?.clone());

    for (source, target) in mapping.iter().filter(|(source, _)| *source != FIPS_CODE) {
        let column = secondary
            .column(source)
            .map_err(|_| ReconcileError::ColumnNotFound {
                column: source.to_string(),
            })?;
        columns.push(column.clone().with_name(target.into()));
    }

    Ok(DataFrame::new(columns)?)
}

/// Nulls, plus NaN cells in float columns.
fn missing_values(column: &Column) -> Result<usize> {
    let nulls = column.null_count();
    if !column.dtype().is_float() {
        return Ok(nulls);
    }
    let values = column.cast(&DataType::Float64)?;
    let nans = values
        .f64()?
        .iter()
        .filter(|value| value.is_some_and(f64::is_nan))
        .count();
    Ok(nulls + nans)
}

fn fips_values(df: &DataFrame) -> Result<StringChunked> {
    Ok(df.column(FIPS_CODE)?.cast(&DataType::String)?.str()?.clone())
}

fn missing_fips(counties: &DataFrame, secondary: &DataFrame) -> Result<Vec<String>> {
    let canonical = fips_values(counties)?;
    let secondary = fips_values(secondary)?;
    let present: HashSet<&str> = secondary.iter().flatten().collect();

    Ok(canonical
        .iter()
        .flatten()
        .filter(|fips| !present.contains(fips))
        .map(str::to_string)
        .collect())
}
