//! Pipeline configuration.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Result, TransformError};

/// Population projection variant kept by default.
pub const DEFAULT_POPULATION_VARIANT: &str = "Medium";
/// Location type code of countries in the population file.
pub const COUNTRY_LOCATION_TYPE: i64 = 4;
/// Population counts are published in thousands.
pub const DEFAULT_POPULATION_MULTIPLIER: f64 = 1000.0;

/// An inclusive range of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    fn validate(&self, name: &'static str) -> Result<()> {
        if self.start > self.end {
            return Err(TransformError::InvalidYearRange {
                name,
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Default population window.
pub const DEFAULT_POPULATION_YEARS: YearRange = YearRange::new(1990, 2019);
/// Default alcohol window.
pub const DEFAULT_ALCOHOL_YEARS: YearRange = YearRange::new(2000, 2019);

/// Options for a harmonization run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// `Variant` value kept from the population file.
    pub population_variant: String,
    /// Years kept from the population file.
    pub population_years: YearRange,
    /// `LocTypeID` value kept from the population file.
    pub location_type: i64,
    /// Factor converting population source units to head counts.
    pub population_multiplier: f64,
    /// Years kept from the alcohol file.
    pub alcohol_years: YearRange,
    /// Rewrite country names to their canonical spelling before merging.
    pub reconcile_names: bool,
    /// Run the three normalizers on separate threads.
    pub parallel: bool,
    /// Extra `country,continent` overrides layered over the embedded table.
    pub override_file: Option<PathBuf>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            population_variant: DEFAULT_POPULATION_VARIANT.to_string(),
            population_years: DEFAULT_POPULATION_YEARS,
            location_type: COUNTRY_LOCATION_TYPE,
            population_multiplier: DEFAULT_POPULATION_MULTIPLIER,
            alcohol_years: DEFAULT_ALCOHOL_YEARS,
            reconcile_names: true,
            parallel: true,
            override_file: None,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_population_variant(mut self, variant: impl Into<String>) -> Self {
        self.population_variant = variant.into();
        self
    }

    pub fn with_population_years(mut self, years: YearRange) -> Self {
        self.population_years = years;
        self
    }

    pub fn with_location_type(mut self, location_type: i64) -> Self {
        self.location_type = location_type;
        self
    }

    pub fn with_population_multiplier(mut self, multiplier: f64) -> Self {
        self.population_multiplier = multiplier;
        self
    }

    pub fn with_alcohol_years(mut self, years: YearRange) -> Self {
        self.alcohol_years = years;
        self
    }

    pub fn with_reconcile_names(mut self, enabled: bool) -> Self {
        self.reconcile_names = enabled;
        self
    }

    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn with_override_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_file = Some(path.into());
        self
    }

    /// Reject year ranges with reversed bounds.
    pub fn validate(&self) -> Result<()> {
        self.population_years.validate("population")?;
        self.alcohol_years.validate("alcohol")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_sources() {
        let options = PipelineOptions::default();
        assert_eq!(options.population_variant, "Medium");
        assert_eq!(options.population_years, YearRange::new(1990, 2019));
        assert_eq!(options.location_type, 4);
        assert_eq!(options.population_multiplier, 1000.0);
        assert_eq!(options.alcohol_years, YearRange::new(2000, 2019));
        assert!(options.reconcile_names);
        assert!(options.parallel);
        assert!(options.override_file.is_none());
    }

    #[test]
    fn year_range_is_inclusive() {
        let range = YearRange::new(2000, 2019);
        assert!(range.contains(2000));
        assert!(range.contains(2019));
        assert!(!range.contains(1999));
        assert!(!range.contains(2020));
        assert_eq!(range.to_string(), "2000-2019");
    }

    #[test]
    fn reversed_range_is_rejected() {
        let options = PipelineOptions::new().with_alcohol_years(YearRange::new(2019, 2000));
        assert!(matches!(
            options.validate(),
            Err(TransformError::InvalidYearRange { name: "alcohol", .. })
        ));
    }
}
