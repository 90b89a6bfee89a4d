use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fips_census::{
    CensusFetcher, FetchOutput, ShapeOptions, ShapeSummary, Transport, shape_county_table_with,
};
use fips_ingest::{read_county_table, read_local_table, write_table_atomic};
use fips_model::{ColumnMapping, FIPS_CODE};
use fips_reconcile::{Reconciled, normalize_fips, reconcile};
use tracing::{info, info_span};

use crate::config::FileConfig;

/// A fetched and shaped census table.
#[derive(Debug, Clone)]
pub struct FetchedTable {
    pub name: String,
    pub output: FetchOutput,
    pub shape: ShapeSummary,
}

/// Inputs of `fips reconcile`.
#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    /// Canonical county table with a `fips_code` column.
    pub counties: PathBuf,
    /// Secondary source table.
    pub source: PathBuf,
    /// Identifier column of the secondary source.
    pub fips_column: String,
    pub mapping: ColumnMapping,
    /// Where to write the joined table, if anywhere.
    pub output: Option<PathBuf>,
}

impl ReconcileRequest {
    /// Label used in logs and the summary.
    pub fn source_name(&self) -> String {
        self.source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}

/// Fetches and shapes the selected tables over HTTP.
pub fn run_fetch(
    config: &FileConfig,
    table: Option<&str>,
    year: Option<&str>,
    options: &ShapeOptions,
) -> Result<Vec<FetchedTable>> {
    let fetcher = CensusFetcher::http(config.census.clone()).context("create census client")?;
    run_fetch_with(&fetcher, config, table, year, options)
}

/// Fetches and shapes the selected tables through `fetcher`.
///
/// Tables are processed in configuration order; the first failure stops
/// the run.
pub fn run_fetch_with<T: Transport>(
    fetcher: &CensusFetcher<T>,
    config: &FileConfig,
    table: Option<&str>,
    year: Option<&str>,
    options: &ShapeOptions,
) -> Result<Vec<FetchedTable>> {
    let tables = config.select(table)?;
    let mut fetched = Vec::with_capacity(tables.len());

    for spec in tables {
        let span = info_span!("table", name = %spec.name);
        let _guard = span.enter();

        let year = year
            .or(spec.year.as_deref())
            .unwrap_or(config.census.year.as_str());
        let (output, shape) = fetcher
            .fetch_shaped(&spec.columns, year, &spec.file_name(), options)
            .with_context(|| format!("fetch table '{}'", spec.name))?;
        fetched.push(FetchedTable {
            name: spec.name.clone(),
            output,
            shape,
        });
    }

    info!(tables = fetched.len(), "fetch complete");
    Ok(fetched)
}

/// Shapes an existing fetcher dump in place.
pub fn run_shape(path: &Path, variables: &[String], options: &ShapeOptions) -> Result<ShapeSummary> {
    shape_county_table_with(path, variables, options)
        .with_context(|| format!("shape {}", path.display()))
}

/// Normalizes the secondary source and joins it onto the county table.
pub fn run_reconcile(request: &ReconcileRequest) -> Result<Reconciled> {
    let source_name = request.source_name();
    let span = info_span!("reconcile", source = %source_name);
    let _guard = span.enter();

    let counties = read_county_table(&request.counties)
        .with_context(|| format!("read county table {}", request.counties.display()))?;
    let counties = normalize_fips(&counties, FIPS_CODE).context("normalize county table")?;

    let raw = read_local_table(&request.source, &[request.fips_column.as_str()])
        .with_context(|| format!("read source table {}", request.source.display()))?;
    let secondary = normalize_fips(&raw, &request.fips_column)
        .with_context(|| format!("normalize column '{}'", request.fips_column))?;

    let reconciled = reconcile(&secondary, &request.mapping, &counties)?;
    reconciled.report.log(&source_name);

    if let Some(output) = &request.output {
        let mut table = reconciled.table.clone();
        write_table_atomic(&mut table, output)
            .with_context(|| format!("write {}", output.display()))?;
        info!(path = %output.display(), rows = table.height(), "reconciled table saved");
    }

    Ok(reconciled)
}
