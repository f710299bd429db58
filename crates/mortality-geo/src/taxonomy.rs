//! Primary country → ISO alpha-2 → continent lookup.

use std::collections::BTreeMap;
use std::io::Cursor;

use mortality_model::Continent;
use serde::Deserialize;

use crate::embedded;
use crate::error::{GeoError, Result};

#[derive(Debug, Deserialize)]
struct CountryRow {
    alpha2: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ContinentRow {
    alpha2: String,
    continent: String,
}

/// Why the primary lookup could not place a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFailure {
    /// The name is not registered for any alpha-2 code.
    UnknownName,
    /// The name is registered for more than one alpha-2 code.
    AmbiguousName,
    /// The alpha-2 code has no continent in the taxonomy.
    NoContinent,
}

/// Alpha-2 code of a registered name, or a marker for names shared by codes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum NameEntry {
    Code(String),
    Ambiguous,
}

/// Standard geographic taxonomy keyed by country name.
///
/// Names are matched after trimming and Unicode lowercasing, so `ÅLAND`
/// finds `Åland`.
#[derive(Debug, Clone, Default)]
pub struct CountryTaxonomy {
    names: BTreeMap<String, NameEntry>,
    continents: BTreeMap<String, Continent>,
}

impl CountryTaxonomy {
    /// Load the taxonomy compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_csv_str(embedded::COUNTRIES, embedded::COUNTRY_CONTINENTS)
    }

    /// Build a taxonomy from `alpha2,name` and `alpha2,continent` CSV content.
    pub fn from_csv_str(countries: &str, continents: &str) -> Result<Self> {
        let mut taxonomy = Self::default();

        for row in read_rows::<CountryRow>(countries, embedded::COUNTRIES_FILE)? {
            let code = row.alpha2.trim().to_ascii_uppercase();
            let key = name_key(&row.name);
            if code.is_empty() || key.is_empty() {
                continue;
            }
            taxonomy
                .names
                .entry(key)
                .and_modify(|entry| {
                    if *entry != NameEntry::Code(code.clone()) {
                        *entry = NameEntry::Ambiguous;
                    }
                })
                .or_insert_with(|| NameEntry::Code(code.clone()));
        }

        for row in read_rows::<ContinentRow>(continents, embedded::COUNTRY_CONTINENTS_FILE)? {
            let code = row.alpha2.trim().to_ascii_uppercase();
            let continent =
                Continent::from_code(&row.continent).ok_or_else(|| GeoError::InvalidContinent {
                    key: code.clone(),
                    value: row.continent.clone(),
                    file: embedded::COUNTRY_CONTINENTS_FILE.to_string(),
                })?;
            taxonomy.continents.insert(code, continent);
        }

        tracing::debug!(
            names = taxonomy.names.len(),
            codes = taxonomy.continents.len(),
            "loaded country taxonomy"
        );
        Ok(taxonomy)
    }

    /// ISO alpha-2 code registered for a country name.
    pub fn alpha2(&self, country: &str) -> std::result::Result<&str, LookupFailure> {
        match self.names.get(&name_key(country)) {
            Some(NameEntry::Code(code)) => Ok(code.as_str()),
            Some(NameEntry::Ambiguous) => Err(LookupFailure::AmbiguousName),
            None => Err(LookupFailure::UnknownName),
        }
    }

    /// Continent for an ISO alpha-2 code.
    pub fn continent_of_code(&self, alpha2: &str) -> Option<Continent> {
        self.continents
            .get(&alpha2.trim().to_ascii_uppercase())
            .copied()
    }

    /// Full primary lookup: name → alpha-2 → continent.
    pub fn continent(&self, country: &str) -> std::result::Result<Continent, LookupFailure> {
        let code = self.alpha2(country)?;
        self.continent_of_code(code)
            .ok_or(LookupFailure::NoContinent)
    }

    /// Number of registered names.
    pub fn name_count(&self) -> usize {
        self.names.len()
    }
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Deserialize every row of a headered CSV table.
pub(crate) fn read_rows<T>(content: &str, file: &str) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(content.as_bytes()));
    let mut rows = Vec::new();
    for result in reader.deserialize::<T>() {
        let row = result.map_err(|e| GeoError::CsvParse {
            file: file.to_string(),
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTRIES: &str = "alpha2,name\nDE,Germany\nGB,United Kingdom\nGB,Britain\nXX,Britain\nTL,Timor-Leste\n";
    const CONTINENTS: &str = "alpha2,continent\nDE,EU\nGB,EU\n";

    #[test]
    fn resolves_name_through_code() {
        let taxonomy = CountryTaxonomy::from_csv_str(COUNTRIES, CONTINENTS).unwrap();
        assert_eq!(taxonomy.alpha2("Germany"), Ok("DE"));
        assert_eq!(taxonomy.continent("germany "), Ok(Continent::Europe));
    }

    #[test]
    fn matching_lowercases_non_ascii_letters() {
        let taxonomy =
            CountryTaxonomy::from_csv_str("alpha2,name\nAX,Åland Islands\n", "alpha2,continent\nAX,EU\n")
                .unwrap();
        assert_eq!(taxonomy.continent("ÅLAND ISLANDS"), Ok(Continent::Europe));
    }

    #[test]
    fn shared_names_are_ambiguous() {
        let taxonomy = CountryTaxonomy::from_csv_str(COUNTRIES, CONTINENTS).unwrap();
        assert_eq!(taxonomy.continent("Britain"), Err(LookupFailure::AmbiguousName));
        assert_eq!(
            taxonomy.continent("United Kingdom"),
            Ok(Continent::Europe)
        );
    }

    #[test]
    fn code_without_continent_fails() {
        let taxonomy = CountryTaxonomy::from_csv_str(COUNTRIES, CONTINENTS).unwrap();
        assert_eq!(taxonomy.continent("Timor-Leste"), Err(LookupFailure::NoContinent));
        assert_eq!(taxonomy.continent("Atlantis"), Err(LookupFailure::UnknownName));
    }

    #[test]
    fn rejects_unknown_continent_code() {
        let result = CountryTaxonomy::from_csv_str(COUNTRIES, "alpha2,continent\nDE,XX\n");
        assert!(matches!(result, Err(GeoError::InvalidContinent { .. })));
    }

    #[test]
    fn embedded_taxonomy_loads() {
        let taxonomy = CountryTaxonomy::embedded().unwrap();
        assert!(taxonomy.name_count() > 200);
        assert_eq!(taxonomy.continent("Namibia"), Ok(Continent::Africa));
    }
}
