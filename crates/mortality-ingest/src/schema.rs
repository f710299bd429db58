//! Required columns of the three source files.

use std::path::Path;

use mortality_model::columns;

use crate::csv::CsvHeaders;
use crate::error::{IngestError, Result};

/// The three fixed input shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Wide death-by-cause table, one column per cause.
    Deaths,
    /// Age-stratified population estimates, in thousands.
    Population,
    /// Per-capita alcohol consumption.
    Alcohol,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [Self::Deaths, Self::Population, Self::Alcohol];

    /// Short name used in messages and log fields.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Deaths => "deaths",
            Self::Population => "population",
            Self::Alcohol => "alcohol",
        }
    }

    /// Columns the file must contain.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Deaths => &columns::DEATHS_REQUIRED,
            Self::Population => &columns::POPULATION_REQUIRED,
            Self::Alcohol => &columns::ALCOHOL_REQUIRED,
        }
    }

    /// Fail with a schema error naming the first missing required column
    /// or the first repeated column.
    pub fn check_headers(&self, headers: &CsvHeaders, path: &Path) -> Result<()> {
        if let Some(column) = headers.first_missing(self.required_columns()) {
            return Err(IngestError::MissingColumn {
                column: column.to_string(),
                source_name: self.name(),
                path: path.to_path_buf(),
            });
        }
        if let Some(column) = headers.duplicates().first() {
            return Err(IngestError::DuplicateColumn {
                column: (*column).to_string(),
                source_name: self.name(),
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
