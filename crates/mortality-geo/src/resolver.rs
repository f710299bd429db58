//! Two-stage continent resolution.
//!
//! 1. Primary lookup through the geographic taxonomy (name → alpha-2 →
//!    continent).
//! 2. Manual override table keyed by exact country name.
//! 3. `Continent::Other` when both stages miss.
//!
//! Resolution is a pure function of the two tables, so one resolver instance
//! gives the same answer for a country wherever it is attached.

use std::collections::BTreeMap;
use std::path::Path;

use mortality_model::Continent;

use crate::error::Result;
use crate::overrides::ContinentOverrides;
use crate::taxonomy::{CountryTaxonomy, LookupFailure};

/// Which stage placed a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Placed by the geographic taxonomy.
    Taxonomy(Continent),
    /// Placed by the manual override table after the taxonomy missed.
    Override(Continent, LookupFailure),
    /// Neither stage could place the country.
    Fallback(LookupFailure),
}

impl Resolution {
    pub fn continent(&self) -> Continent {
        match self {
            Self::Taxonomy(continent) | Self::Override(continent, _) => *continent,
            Self::Fallback(_) => Continent::Other,
        }
    }
}

/// Maps country names to continents.
#[derive(Debug, Clone)]
pub struct ContinentResolver {
    taxonomy: CountryTaxonomy,
    overrides: ContinentOverrides,
}

impl ContinentResolver {
    pub fn new(taxonomy: CountryTaxonomy, overrides: ContinentOverrides) -> Self {
        Self {
            taxonomy,
            overrides,
        }
    }

    /// Resolver backed by the embedded taxonomy and override tables.
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(
            CountryTaxonomy::embedded()?,
            ContinentOverrides::embedded()?,
        ))
    }

    /// Layer an external `country,continent` override file over the current
    /// override table.
    pub fn with_override_file(mut self, path: &Path) -> Result<Self> {
        let extra = ContinentOverrides::from_path(path)?;
        tracing::info!(
            path = %path.display(),
            entries = extra.len(),
            "loaded continent overrides"
        );
        self.overrides = self.overrides.merged_with(extra);
        Ok(self)
    }

    /// Resolve a country and report which stage placed it.
    pub fn resolution(&self, country: &str) -> Resolution {
        match self.taxonomy.continent(country) {
            Ok(continent) => Resolution::Taxonomy(continent),
            Err(failure) => match self.overrides.get(country) {
                Some(continent) => Resolution::Override(continent, failure),
                None => Resolution::Fallback(failure),
            },
        }
    }

    /// Continent for a country; never fails.
    pub fn resolve(&self, country: &str) -> Continent {
        self.resolution(country).continent()
    }

    /// Resolve each distinct country once.
    ///
    /// Countries ending up in `Other` are logged at debug level.
    pub fn resolve_all<'a, I>(&self, countries: I) -> BTreeMap<String, Continent>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut resolved = BTreeMap::new();
        for country in countries {
            if resolved.contains_key(country) {
                continue;
            }
            let resolution = self.resolution(country);
            if let Resolution::Fallback(failure) = resolution {
                tracing::debug!(country, ?failure, "country has no continent");
            }
            resolved.insert(country.to_string(), resolution.continent());
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ContinentResolver {
        ContinentResolver::embedded().expect("embedded tables")
    }

    #[test]
    fn primary_lookup_places_germany() {
        assert_eq!(
            resolver().resolution("Germany"),
            Resolution::Taxonomy(Continent::Europe)
        );
    }

    #[test]
    fn override_places_timor_leste() {
        assert!(matches!(
            resolver().resolution("Timor-Leste"),
            Resolution::Override(Continent::Asia, _)
        ));
    }

    #[test]
    fn unknown_country_falls_back_to_other() {
        assert_eq!(
            resolver().resolution("Atlantis"),
            Resolution::Fallback(LookupFailure::UnknownName)
        );
        assert_eq!(resolver().resolve("Atlantis"), Continent::Other);
        assert_eq!(resolver().resolve(""), Continent::Other);
    }

    #[test]
    fn resolve_all_deduplicates() {
        let resolved = resolver().resolve_all(["France", "Atlantis", "France"]);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved["France"], Continent::Europe);
        assert_eq!(resolved["Atlantis"], Continent::Other);
    }
}
