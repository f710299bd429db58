//! Subscriber setup for the `tracing` events emitted by the pipeline.
//!
//! Every stage (load, normalize, reshape, reconcile, merge) runs in its own
//! span and reports row counts as structured fields. With `-v` the stage
//! summaries become visible, `-vv` adds per-stage drop counts and
//! unresolved countries.
//!
//! | level   | pipeline events                                  |
//! |---------|--------------------------------------------------|
//! | `error` | fatal errors                                     |
//! | `warn`  | empty or unusually wide source tables            |
//! | `info`  | stage progress, row counts, durations            |
//! | `debug` | dropped rows, name reconciliation, countries     |
//! |         | left in `Other`                                  |
//!
//! `RUST_LOG` replaces the computed directives unless a verbosity flag or
//! `--log-level` was given.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Crates whose events follow the configured level. Dependencies such as
/// polars stay at `warn`.
const PIPELINE_CRATES: [&str; 5] = [
    "mortality_cli",
    "mortality_geo",
    "mortality_ingest",
    "mortality_model",
    "mortality_transform",
];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// How pipeline events are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    /// One JSON object per event, with stage durations on span close.
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` replace the computed directives.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    pub with_target: bool,
    /// Emit span close events (JSON only), which carry stage durations.
    pub with_spans: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_spans: true,
            with_ansi: true,
            format: LogFormat::Pretty,
            log_file: None,
        }
    }
}

impl LogConfig {
    /// Level from a `-v` count: none is `warn`, then `info`, `debug` and
    /// `trace`.
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level_filter = match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self {
            level_filter,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self, enable: bool) -> Self {
        self.with_timestamps = enable;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Filter used when `RUST_LOG` does not apply.
    pub fn directives(&self) -> String {
        default_directives(self.level_filter)
    }
}

/// Install the global subscriber. Call once, before the pipeline runs.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened for appending.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            init_logging_with_writer(config, Mutex::new(file));
        }
        None => init_logging_with_writer(config, io::stderr),
    }
    Ok(())
}

/// Install the global subscriber writing to `writer`.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    build_subscriber(config, writer).init();
}

/// The subscriber [`init_logging_with_writer`] installs, for scoped use with
/// `tracing::subscriber::with_default`.
pub fn build_subscriber<W>(config: &LogConfig, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = build_layer(config, writer).with_filter(build_env_filter(config));
    tracing_subscriber::registry().with(layer)
}

fn build_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);
    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => {
            let spans = if config.with_spans {
                FmtSpan::CLOSE
            } else {
                FmtSpan::NONE
            };
            base.json().with_span_events(spans).boxed()
        }
        (LogFormat::Compact, true) => base.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => base
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => base.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => base.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

/// Directives that put every pipeline crate at `level_filter` and everything
/// else at `warn`.
pub fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    std::iter::once("warn".to_string())
        .chain(
            PIPELINE_CRATES
                .iter()
                .map(|target| format!("{target}={level}")),
        )
        .collect::<Vec<_>>()
        .join(",")
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(config.directives())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(LogConfig::from_verbosity(0).level_filter, LevelFilter::WARN);
        assert_eq!(LogConfig::from_verbosity(1).level_filter, LevelFilter::INFO);
        assert_eq!(LogConfig::from_verbosity(2).level_filter, LevelFilter::DEBUG);
        assert_eq!(LogConfig::from_verbosity(9).level_filter, LevelFilter::TRACE);
    }

    #[test]
    fn directives_cover_pipeline_crates() {
        insta::assert_snapshot!(
            default_directives(LevelFilter::DEBUG),
            @"warn,mortality_cli=debug,mortality_geo=debug,mortality_ingest=debug,mortality_model=debug,mortality_transform=debug"
        );
    }

    #[test]
    fn off_silences_pipeline_crates() {
        let config = LogConfig::default().with_level_filter(LevelFilter::OFF);
        assert!(config.directives().ends_with("mortality_transform=off"));
    }
}
