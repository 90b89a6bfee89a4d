//! CLI argument definitions for the `fips` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use fips_model::EXPECTED_COUNTY_COUNT;

#[derive(Parser)]
#[command(
    name = "fips",
    version,
    about = "County FIPS toolkit - fetch, shape, and reconcile county tables",
    long_about = "Fetch county tables from the Census ACS 5-year API, shape them into the\n\
                  canonical fips_code layout, and left-join secondary sources onto the\n\
                  canonical county list with a report of every county they miss."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the configured census tables and shape them in place.
    Fetch(FetchArgs),

    /// Shape an existing fetched table in place.
    Shape(ShapeArgs),

    /// Join a secondary source onto the canonical county table.
    Reconcile(ReconcileArgs),
}

#[derive(Parser)]
pub struct FetchArgs {
    /// Configuration file with the census settings and tables.
    #[arg(long = "config", value_name = "PATH", default_value = "fips.toml")]
    pub config: PathBuf,

    /// Only fetch the table with this name.
    #[arg(long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// Vintage to request (overrides the configuration).
    #[arg(long = "year", value_name = "YEAR")]
    pub year: Option<String>,

    /// Required number of counties after shaping.
    #[arg(long = "expected-rows", value_name = "N", default_value_t = EXPECTED_COUNTY_COUNT)]
    pub expected_rows: usize,
}

#[derive(Parser)]
pub struct ShapeArgs {
    /// Table written by `fips fetch` (State, County, Name, variables...).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Variable column to keep; repeat for several.
    #[arg(long = "variable", value_name = "NAME")]
    pub variables: Vec<String>,

    /// Required number of counties after shaping.
    #[arg(long = "expected-rows", value_name = "N", default_value_t = EXPECTED_COUNTY_COUNT)]
    pub expected_rows: usize,
}

#[derive(Parser)]
pub struct ReconcileArgs {
    /// Canonical county table with a fips_code column.
    #[arg(long = "counties", value_name = "PATH")]
    pub counties: PathBuf,

    /// Secondary source table.
    #[arg(long = "source", value_name = "PATH")]
    pub source: PathBuf,

    /// Identifier column of the secondary source.
    #[arg(long = "fips-column", value_name = "COLUMN", default_value = "fips_code")]
    pub fips_column: String,

    /// Column to keep, as SOURCE=TARGET; repeat for several.
    #[arg(long = "map", value_name = "SRC=DST", value_parser = parse_mapping_entry, required = true)]
    pub map: Vec<(String, String)>,

    /// Write the joined table here.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Parses `SOURCE=TARGET`. The first `=` splits; targets may contain more.
pub fn parse_mapping_entry(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((source, target)) if !source.is_empty() && !target.is_empty() => {
            Ok((source.to_string(), target.to_string()))
        }
        _ => Err(format!("expected SOURCE=TARGET, got '{value}'")),
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
