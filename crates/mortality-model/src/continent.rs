//! Six-continent taxonomy with an explicit fallback bucket.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Continent a country is attributed to.
///
/// `Other` is the bucket for countries that neither the geographic taxonomy
/// nor the manual override table can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Continent {
    Africa,
    Asia,
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    Oceania,
    Other,
}

impl Continent {
    /// The six classified continents, excluding `Other`.
    pub const CLASSIFIED: [Continent; 6] = [
        Self::Africa,
        Self::Asia,
        Self::Europe,
        Self::NorthAmerica,
        Self::SouthAmerica,
        Self::Oceania,
    ];

    /// Human-readable continent name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Africa => "Africa",
            Self::Asia => "Asia",
            Self::Europe => "Europe",
            Self::NorthAmerica => "North America",
            Self::SouthAmerica => "South America",
            Self::Oceania => "Oceania",
            Self::Other => "Other",
        }
    }

    /// Two-letter continent code used by the geographic taxonomy.
    ///
    /// `Other` has no code.
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Africa => Some("AF"),
            Self::Asia => Some("AS"),
            Self::Europe => Some("EU"),
            Self::NorthAmerica => Some("NA"),
            Self::SouthAmerica => Some("SA"),
            Self::Oceania => Some("OC"),
            Self::Other => None,
        }
    }

    /// Look up a continent by its two-letter code (case-insensitive).
    ///
    /// Codes outside the six-continent taxonomy (e.g. `AN` for Antarctica)
    /// return `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::CLASSIFIED
            .into_iter()
            .find(|continent| continent.code().is_some_and(|c| c.eq_ignore_ascii_case(code)))
    }

    /// Whether this continent is one of the six classified continents.
    pub const fn is_classified(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string is not a known continent name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownContinent(pub String);

impl fmt::Display for UnknownContinent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown continent '{}'", self.0)
    }
}

impl std::error::Error for UnknownContinent {}

impl FromStr for Continent {
    type Err = UnknownContinent;

    /// Parses a continent name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::CLASSIFIED
            .into_iter()
            .chain(std::iter::once(Self::Other))
            .find(|continent| continent.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownContinent(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_for_classified_continents() {
        for continent in Continent::CLASSIFIED {
            let code = continent.code().unwrap();
            assert_eq!(Continent::from_code(code), Some(continent));
        }
    }

    #[test]
    fn antarctica_is_not_classified() {
        assert_eq!(Continent::from_code("AN"), None);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("north america".parse(), Ok(Continent::NorthAmerica));
        assert_eq!(" Other ".parse(), Ok(Continent::Other));
        assert!("Atlantis".parse::<Continent>().is_err());
    }
}
