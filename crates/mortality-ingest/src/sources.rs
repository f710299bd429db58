//! Locating and loading the three source files.

use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::DataFrame;

use crate::csv::{read_csv_schema, read_csv_table};
use crate::error::{IngestError, Result};
use crate::schema::SourceKind;

/// Environment variable for overriding the data directory.
pub const DATA_DIR_ENV_VAR: &str = "MORTALITY_DATA_DIR";

/// Default file name of the death-by-cause table.
pub const DEFAULT_DEATHS_FILE: &str = "cause_of_deaths.csv";
/// Default file name of the population table.
pub const DEFAULT_POPULATION_FILE: &str = "WPP2024_Population1JanuaryByAge5GroupSex_Medium.csv";
/// Default file name of the alcohol consumption table.
pub const DEFAULT_ALCOHOL_FILE: &str =
    "total-alcohol-consumption-per-capita-litres-of-pure-alcohol.csv";

/// Get the data directory.
///
/// Resolution order:
/// 1. `MORTALITY_DATA_DIR` environment variable
/// 2. `data/` relative to the working directory
pub fn data_root() -> PathBuf {
    if let Ok(root) = std::env::var(DATA_DIR_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from("data")
}

/// Paths of the three source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFiles {
    pub deaths: PathBuf,
    pub population: PathBuf,
    pub alcohol: PathBuf,
}

impl SourceFiles {
    pub fn new(
        deaths: impl Into<PathBuf>,
        population: impl Into<PathBuf>,
        alcohol: impl Into<PathBuf>,
    ) -> Self {
        Self {
            deaths: deaths.into(),
            population: population.into(),
            alcohol: alcohol.into(),
        }
    }

    /// The default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            dir.join(DEFAULT_DEATHS_FILE),
            dir.join(DEFAULT_POPULATION_FILE),
            dir.join(DEFAULT_ALCOHOL_FILE),
        )
    }

    /// The default file names inside [`data_root`].
    pub fn from_env() -> Self {
        Self::in_dir(&data_root())
    }

    pub fn path(&self, kind: SourceKind) -> &Path {
        match kind {
            SourceKind::Deaths => &self.deaths,
            SourceKind::Population => &self.population,
            SourceKind::Alcohol => &self.alcohol,
        }
    }
}

/// The three source tables as loaded, every column as text.
#[derive(Debug, Clone)]
pub struct RawSources {
    pub deaths: DataFrame,
    pub population: DataFrame,
    pub alcohol: DataFrame,
}

/// Check the header of every source file for its required columns.
///
/// Runs before any table is fully loaded, so a schema problem in the last
/// file is reported without first reading the large population table.
pub fn check_schemas(files: &SourceFiles) -> Result<()> {
    for kind in SourceKind::ALL {
        let path = files.path(kind);
        let headers = read_csv_schema(path)?;
        kind.check_headers(&headers, path)?;
    }
    Ok(())
}

/// Load a single source file after validating its header.
pub fn load_source(kind: SourceKind, path: &Path) -> Result<DataFrame> {
    let headers = read_csv_schema(path)?;
    kind.check_headers(&headers, path)?;
    let start = Instant::now();
    let df = read_csv_table(path)?;
    tracing::info!(
        source = kind.name(),
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "source loaded"
    );
    Ok(df)
}

/// Load all three source files into memory.
pub fn load_sources(files: &SourceFiles) -> Result<RawSources> {
    check_schemas(files)?;
    Ok(RawSources {
        deaths: load_source(SourceKind::Deaths, &files.deaths)?,
        population: load_source(SourceKind::Population, &files.population)?,
        alcohol: load_source(SourceKind::Alcohol, &files.alcohol)?,
    })
}

/// Fail early when a data directory does not exist.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        })
    }
}
