//! Normalized and merged record types.
//!
//! Every table in the pipeline is a `Vec` of one of these records. Records are
//! plain immutable values; stages build new vectors instead of editing old ones.

use serde::{Deserialize, Serialize};

use crate::continent::Continent;

/// Scale of the rate metric.
pub const RATE_SCALE: f64 = 100_000.0;

/// Join key shared by all three sources.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CountryYear {
    pub country: String,
    pub year: i32,
}

impl CountryYear {
    pub fn new(country: impl Into<String>, year: i32) -> Self {
        Self {
            country: country.into(),
            year,
        }
    }
}

/// One (country, year, cause) cell of the death-by-cause table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathRecord {
    pub country: String,
    pub year: i32,
    pub cause: String,
    /// `None` when the source cell was empty or not numeric.
    pub deaths: Option<f64>,
}

impl DeathRecord {
    pub fn key(&self) -> CountryYear {
        CountryYear::new(self.country.clone(), self.year)
    }
}

/// Population of one age group of one country in one year, in head counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub country: String,
    pub year: i32,
    pub age_group: String,
    pub population_male: i64,
    pub population_female: i64,
    pub population_total: i64,
}

impl PopulationRecord {
    pub fn key(&self) -> CountryYear {
        CountryYear::new(self.country.clone(), self.year)
    }
}

/// Per-capita alcohol consumption of one country in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlcoholRecord {
    pub country: String,
    pub year: i32,
    /// Liters of pure alcohol per capita (15+), `None` when not reported.
    pub liters_per_capita: Option<f64>,
}

impl AlcoholRecord {
    pub fn key(&self) -> CountryYear {
        CountryYear::new(self.country.clone(), self.year)
    }
}

/// One row of the harmonized analytical table.
///
/// `population_total` is the country-year total across age groups, repeated
/// for every cause of that country-year. Rows only exist when the rate is
/// defined, so `population_total > 0` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub country: String,
    pub year: i32,
    pub cause: String,
    pub deaths: f64,
    pub population_total: i64,
    pub death_rate_per_100k: f64,
    pub alcohol_consumption_liters: Option<f64>,
    pub continent: Continent,
}

/// Deaths per 100,000 population.
///
/// Returns `None` when the rate is undefined: a non-positive population, or a
/// deaths value that is negative or not finite.
pub fn death_rate_per_100k(deaths: f64, population_total: i64) -> Option<f64> {
    if population_total <= 0 || !deaths.is_finite() || deaths < 0.0 {
        return None;
    }
    Some(deaths / population_total as f64 * RATE_SCALE)
}
