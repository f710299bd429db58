//! Country-name reconciliation across independently maintained datasets.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::embedded;
use crate::error::Result;
use crate::taxonomy::read_rows;

#[derive(Debug, Deserialize)]
struct AliasRow {
    alias: String,
    canonical: String,
}

/// Maps name variants (e.g. `Viet Nam`) to one canonical spelling
/// (`Vietnam`). Names without an alias map to themselves.
#[derive(Debug, Clone, Default)]
pub struct CountryAliases {
    entries: BTreeMap<String, String>,
}

impl CountryAliases {
    /// Load the alias table compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_csv_str(embedded::COUNTRY_ALIASES, embedded::COUNTRY_ALIASES_FILE)
    }

    /// Parse an `alias,canonical` table.
    pub fn from_csv_str(content: &str, file: &str) -> Result<Self> {
        let entries = read_rows::<AliasRow>(content, file)?
            .into_iter()
            .filter(|row| !row.alias.is_empty() && !row.canonical.is_empty())
            .map(|row| (row.alias, row.canonical))
            .collect();
        Ok(Self { entries })
    }

    /// Canonical spelling of `name`.
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries.get(name).map_or(name, String::as_str)
    }

    /// Whether `name` is a registered variant.
    pub fn is_alias(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_are_unchanged() {
        let aliases = CountryAliases::embedded().unwrap();
        assert_eq!(aliases.canonical("France"), "France");
        assert!(!aliases.is_alias("France"));
    }

    #[test]
    fn population_spellings_reconcile() {
        let aliases = CountryAliases::embedded().unwrap();
        assert_eq!(aliases.canonical("United States of America"), "United States");
        assert_eq!(aliases.canonical("Viet Nam"), "Vietnam");
        assert_eq!(aliases.canonical("Russian Federation"), "Russia");
    }
}
