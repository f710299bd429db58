//! CLI argument definitions for the mortality harmonizer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use mortality_model::Continent;

#[derive(Parser)]
#[command(
    name = "mortality",
    version,
    about = "Harmonize cause-of-death, population and alcohol data",
    long_about = "Harmonize per-country deaths by cause, population by age and alcohol \
                  consumption into one table with deaths per 100,000 population.\n\n\
                  Source files are read from --data-dir (default: $MORTALITY_DATA_DIR \
                  or ./data) unless given explicitly."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub data: DataArgs,

    /// Print results as JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

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

/// Where the source files live and how they are harmonized.
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Directory holding the three source files under their default names.
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Death-by-cause file (overrides --data-dir).
    #[arg(long, value_name = "PATH", global = true)]
    pub deaths: Option<PathBuf>,

    /// Population file (overrides --data-dir).
    #[arg(long, value_name = "PATH", global = true)]
    pub population: Option<PathBuf>,

    /// Alcohol consumption file (overrides --data-dir).
    #[arg(long, value_name = "PATH", global = true)]
    pub alcohol: Option<PathBuf>,

    /// Extra `country,continent` overrides layered over the built-in table.
    #[arg(long, value_name = "PATH", global = true)]
    pub overrides: Option<PathBuf>,

    /// Keep country names exactly as each source spells them.
    #[arg(long = "no-reconcile-names", global = true)]
    pub no_reconcile_names: bool,

    /// Run the normalizers one after another instead of in parallel.
    #[arg(long, global = true)]
    pub sequential: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Row counts, merge statistics and coverage.
    Summary(SummaryArgs),

    /// List the causes of death.
    Causes,

    /// List the years present in the merged table.
    Years,

    /// Change of each cause's death rate between two years.
    Trends(TrendsArgs),

    /// Correlation between alcohol consumption and a cause's death rate.
    Correlate(CorrelateArgs),

    /// Rank changes of the leading causes between two years.
    RankShift(RankShiftArgs),
}

#[derive(Args)]
pub struct SummaryArgs {
    /// Number of countries listed by record count.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

/// Continent/country narrowing shared by the analysis commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only rows of this continent (e.g. "Europe", "North America").
    #[arg(long)]
    pub continent: Option<Continent>,

    /// Only rows of this country, as named in the merged table.
    #[arg(long)]
    pub country: Option<String>,
}

#[derive(Args)]
pub struct TrendsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// First year of the comparison.
    #[arg(long, default_value_t = 1990)]
    pub from: i32,

    /// Second year of the comparison.
    #[arg(long, default_value_t = 2019)]
    pub to: i32,
}

#[derive(Args)]
pub struct CorrelateArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Case-insensitive part of the cause name.
    #[arg(long)]
    pub cause: String,
}

#[derive(Args)]
pub struct RankShiftArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    #[arg(long, default_value_t = 1990)]
    pub from: i32,

    #[arg(long, default_value_t = 2019)]
    pub to: i32,

    /// Number of leading causes taken from each year.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
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
