//! Manual country-name → continent overrides.

use std::collections::BTreeMap;
use std::path::Path;

use mortality_model::Continent;
use serde::Deserialize;

use crate::embedded;
use crate::error::{GeoError, Result};
use crate::taxonomy::read_rows;

#[derive(Debug, Deserialize)]
struct OverrideRow {
    country: String,
    continent: String,
}

/// Continent assignments for names the taxonomy cannot place.
///
/// Keys are exact country-name strings; no case folding is applied.
#[derive(Debug, Clone, Default)]
pub struct ContinentOverrides {
    entries: BTreeMap<String, Continent>,
}

impl ContinentOverrides {
    /// Load the override table compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_csv_str(
            embedded::CONTINENT_OVERRIDES,
            embedded::CONTINENT_OVERRIDES_FILE,
        )
    }

    /// Parse a `country,continent` table. `file` is used in error messages.
    pub fn from_csv_str(content: &str, file: &str) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for row in read_rows::<OverrideRow>(content, file)? {
            let continent: Continent =
                row.continent
                    .parse()
                    .map_err(|_| GeoError::InvalidContinent {
                        key: row.country.clone(),
                        value: row.continent.clone(),
                        file: file.to_string(),
                    })?;
            if row.country.is_empty() {
                continue;
            }
            entries.insert(row.country, continent);
        }
        Ok(Self { entries })
    }

    /// Load a `country,continent` table from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GeoError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_csv_str(&content, &path.display().to_string())
    }

    /// Layer `other` on top of this table; entries in `other` win.
    #[must_use]
    pub fn merged_with(mut self, other: ContinentOverrides) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn get(&self, country: &str) -> Option<Continent> {
        self.entries.get(country).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
