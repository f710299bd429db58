//! Embedded geographic reference tables.
//!
//! All tables are embedded at compile time using `include_str!()` and live as
//! reviewable CSV files under `data/`. Edit the CSV, not the code, to fix a
//! classification gap.

/// ISO 3166-1 alpha-2 codes with their country names (`alpha2,name`).
///
/// A code may appear on several rows to register alternative names.
pub const COUNTRIES: &str = include_str!("../data/countries.csv");

/// Continent code per alpha-2 code (`alpha2,continent`).
///
/// Territories without a continent in the taxonomy are absent.
pub const COUNTRY_CONTINENTS: &str = include_str!("../data/country_continents.csv");

/// Manual country-name to continent overrides (`country,continent`).
pub const CONTINENT_OVERRIDES: &str = include_str!("../data/continent_overrides.csv");

/// Country-name variants and the canonical name they reconcile to
/// (`alias,canonical`).
pub const COUNTRY_ALIASES: &str = include_str!("../data/country_aliases.csv");

/// File names used in error messages for the embedded tables.
pub const COUNTRIES_FILE: &str = "countries.csv";
pub const COUNTRY_CONTINENTS_FILE: &str = "country_continents.csv";
pub const CONTINENT_OVERRIDES_FILE: &str = "continent_overrides.csv";
pub const COUNTRY_ALIASES_FILE: &str = "country_aliases.csv";
