//! Population normalization.
//!
//! The raw population file carries every projection variant, every location
//! type (countries, regions, income groups) and counts in thousands. This
//! module keeps one variant, countries only and a fixed year window, and
//! converts counts to heads.

use std::collections::BTreeMap;
use std::time::Instant;

use mortality_ingest::{f64_values, i64_values, string_values};
use mortality_model::columns::{
    POP_AGE_GROUP, POP_FEMALE, POP_LOC_TYPE, POP_LOCATION, POP_MALE, POP_TIME, POP_TOTAL,
    POP_VARIANT,
};
use mortality_model::{CountryYear, PopulationRecord};
use polars::prelude::*;

use crate::error::Result;
use crate::options::PipelineOptions;

/// Convert a source count to heads, rounded to the nearest person.
///
/// Negative counts are malformed and yield `None`.
pub fn to_head_count(value: f64, multiplier: f64) -> Option<i64> {
    let scaled = (value * multiplier).round();
    if !scaled.is_finite() || scaled < 0.0 || scaled > i64::MAX as f64 {
        return None;
    }
    Some(scaled as i64)
}

/// Filter and rescale the raw population table.
///
/// Keeps rows of the configured variant, location type and year window; one
/// output row per (country, year, age group) in file order. Rows missing any
/// required field are dropped.
pub fn normalize(raw: &DataFrame, options: &PipelineOptions) -> Result<Vec<PopulationRecord>> {
    let span = tracing::info_span!("normalize_population", rows_in = raw.height());
    let _guard = span.enter();
    let start = Instant::now();

    let years = options.population_years;
    let time = col(POP_TIME).cast(DataType::Int64);
    let filtered = raw
        .clone()
        .lazy()
        .filter(
            col(POP_VARIANT)
                .eq(lit(options.population_variant.as_str()))
                .and(col(POP_LOC_TYPE).cast(DataType::Int64).eq(lit(options.location_type)))
                .and(time.clone().gt_eq(lit(i64::from(years.start))))
                .and(time.lt_eq(lit(i64::from(years.end)))),
        )
        .select([
            col(POP_LOCATION),
            col(POP_TIME),
            col(POP_AGE_GROUP),
            col(POP_MALE),
            col(POP_FEMALE),
            col(POP_TOTAL),
        ])
        .collect()?;

    let columns = PopulationColumns::extract(&filtered)?;
    let multiplier = options.population_multiplier;
    let mut records = Vec::with_capacity(filtered.height());
    let mut incomplete = 0usize;
    for idx in 0..filtered.height() {
        match columns.record(idx, multiplier) {
            Some(record) => records.push(record),
            None => incomplete += 1,
        }
    }

    if incomplete > 0 {
        tracing::debug!(incomplete, "population rows with missing fields dropped");
    }
    tracing::info!(
        rows_filtered = filtered.height(),
        rows_out = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "population normalized"
    );
    Ok(records)
}

struct PopulationColumns {
    countries: Vec<Option<String>>,
    times: Vec<Option<i64>>,
    age_groups: Vec<Option<String>>,
    males: Vec<Option<f64>>,
    females: Vec<Option<f64>>,
    totals: Vec<Option<f64>>,
}

impl PopulationColumns {
    fn extract(df: &DataFrame) -> Result<Self> {
        Ok(Self {
            countries: string_values(df, POP_LOCATION)?,
            times: i64_values(df, POP_TIME)?,
            age_groups: string_values(df, POP_AGE_GROUP)?,
            males: f64_values(df, POP_MALE)?,
            females: f64_values(df, POP_FEMALE)?,
            totals: f64_values(df, POP_TOTAL)?,
        })
    }

    fn record(&self, idx: usize, multiplier: f64) -> Option<PopulationRecord> {
        Some(PopulationRecord {
            country: self.countries[idx].clone()?,
            year: i32::try_from(self.times[idx]?).ok()?,
            age_group: self.age_groups[idx].clone()?,
            population_male: to_head_count(self.males[idx]?, multiplier)?,
            population_female: to_head_count(self.females[idx]?, multiplier)?,
            population_total: to_head_count(self.totals[idx]?, multiplier)?,
        })
    }
}

/// Sum `population_total` across age groups per (country, year).
///
/// Sums saturate at `i64::MAX`, so a total is never negative.
pub fn totals_by_country_year(records: &[PopulationRecord]) -> BTreeMap<CountryYear, i64> {
    let mut totals: BTreeMap<CountryYear, i64> = BTreeMap::new();
    for record in records {
        let total = totals.entry(record.key()).or_insert(0);
        *total = total.saturating_add(record.population_total);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_counts_are_rounded() {
        assert_eq!(to_head_count(1234.0, 1000.0), Some(1_234_000));
        assert_eq!(to_head_count(1.2344, 1000.0), Some(1234));
        assert_eq!(to_head_count(-1.0, 1000.0), None);
    }

    #[test]
    fn totals_sum_age_groups() {
        let record = |age: &str, total: i64| PopulationRecord {
            country: "Chile".to_string(),
            year: 2000,
            age_group: age.to_string(),
            population_male: 0,
            population_female: 0,
            population_total: total,
        };
        let totals = totals_by_country_year(&[record("0-4", 100), record("5-9", 50)]);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[&CountryYear::new("Chile", 2000)], 150);
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let huge = to_head_count(5.0e15, 1000.0).unwrap();
        let record = |age: &str| PopulationRecord {
            country: "Chile".to_string(),
            year: 2000,
            age_group: age.to_string(),
            population_male: 0,
            population_female: 0,
            population_total: huge,
        };
        let totals = totals_by_country_year(&[record("0-4"), record("5-9")]);
        assert_eq!(totals[&CountryYear::new("Chile", 2000)], i64::MAX);
    }
}
