//! Mortality harmonizer CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use mortality_cli::commands::{
    RunConfig, SourceSelection, causes, correlate, harmonize, rank_shifts, summary, trends, years,
};
use mortality_cli::logging::{LogConfig, LogFormat, init_logging};
use mortality_cli::report::{Report, render_json, render_text};
use mortality_transform::analysis::RecordFilter;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, DataArgs, FilterArgs, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let config = RunConfig::from_selection(selection_from_args(&cli.data))?;
    let data = harmonize(&config)?;
    match &cli.command {
        Command::Summary(args) => emit(&summary(&data, args.top), cli.json),
        Command::Causes => emit(&causes(&data), cli.json),
        Command::Years => emit(&years(&data), cli.json),
        Command::Trends(args) => emit(
            &trends(&data, args.from, args.to, &filter_from_args(&args.filter)),
            cli.json,
        ),
        Command::Correlate(args) => emit(
            &correlate(&data, &args.cause, &filter_from_args(&args.filter)),
            cli.json,
        ),
        Command::RankShift(args) => emit(
            &rank_shifts(
                &data,
                args.from,
                args.to,
                args.top,
                &filter_from_args(&args.filter),
            ),
            cli.json,
        ),
    }
}

fn emit<R: Report>(report: &R, json: bool) -> Result<()> {
    if json {
        println!("{}", render_json(report)?);
    } else {
        println!("{}", render_text(report));
    }
    Ok(())
}

fn selection_from_args(args: &DataArgs) -> SourceSelection {
    SourceSelection {
        data_dir: args.data_dir.clone(),
        deaths: args.deaths.clone(),
        population: args.population.clone(),
        alcohol: args.alcohol.clone(),
        overrides: args.overrides.clone(),
        reconcile_names: !args.no_reconcile_names,
        parallel: !args.sequential,
    }
}

fn filter_from_args(args: &FilterArgs) -> RecordFilter {
    RecordFilter {
        continent: args.continent,
        country: args.country.clone(),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
