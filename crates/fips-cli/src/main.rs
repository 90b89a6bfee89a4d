//! `fips` command-line driver.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use fips_census::ShapeOptions;
use fips_cli::commands::{ReconcileRequest, run_fetch, run_reconcile, run_shape};
use fips_cli::config::load_config;
use fips_cli::logging::{LogConfig, LogFormat, init_logging};
use fips_model::ColumnMapping;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, FetchArgs, LogFormatArg, LogLevelArg, ReconcileArgs, ShapeArgs};
use crate::summary::{print_fetch_summary, print_reconcile_summary, print_shape_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match cli.command {
        Command::Fetch(args) => fetch(&args),
        Command::Shape(args) => shape(&args),
        Command::Reconcile(args) => reconcile(args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn shape_options(expected_rows: usize) -> ShapeOptions {
    ShapeOptions {
        expected_rows,
        ..ShapeOptions::default()
    }
}

fn fetch(args: &FetchArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let tables = run_fetch(
        &config,
        args.table.as_deref(),
        args.year.as_deref(),
        &shape_options(args.expected_rows),
    )?;
    print_fetch_summary(&tables);
    Ok(())
}

fn shape(args: &ShapeArgs) -> anyhow::Result<()> {
    let summary = run_shape(
        &args.path,
        &args.variables,
        &shape_options(args.expected_rows),
    )?;
    print_shape_summary(&summary);
    Ok(())
}

fn reconcile(args: ReconcileArgs) -> anyhow::Result<()> {
    let request = ReconcileRequest {
        counties: args.counties,
        source: args.source,
        fips_column: args.fips_column,
        mapping: args.map.into_iter().collect::<ColumnMapping>(),
        output: args.output,
    };
    let reconciled = run_reconcile(&request)?;
    print_reconcile_summary(
        &request.source_name(),
        &reconciled.report,
        request.output.as_deref(),
    );
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level(level_filter)
        .with_format(format)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
