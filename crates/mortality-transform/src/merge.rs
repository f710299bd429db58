//! Merge engine.
//!
//! Joins the long-form death table with per-country-year population totals
//! and alcohol consumption, derives the per-100k rate and attaches continents.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use mortality_geo::ContinentResolver;
use mortality_model::{
    AlcoholRecord, CountryYear, DeathRecord, MergedRecord, PopulationRecord, death_rate_per_100k,
};
use serde::Serialize;

use crate::population::totals_by_country_year;

/// Row accounting of one merge.
///
/// Every input row ends up in exactly one bucket:
/// `rows_in == rows_out + missing_population + non_positive_population
/// + missing_deaths + invalid_deaths`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub rows_in: usize,
    /// No population row for the (country, year).
    pub missing_population: usize,
    /// Population total of zero.
    pub non_positive_population: usize,
    pub missing_deaths: usize,
    /// Negative death counts.
    pub invalid_deaths: usize,
    pub rows_out: usize,
    /// Rows whose (country, year) has alcohol data.
    pub with_alcohol: usize,
}

impl MergeStats {
    pub fn dropped(&self) -> usize {
        self.missing_population
            + self.non_positive_population
            + self.missing_deaths
            + self.invalid_deaths
    }
}

/// Merged table plus its row accounting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutput {
    pub records: Vec<MergedRecord>,
    pub stats: MergeStats,
}

/// Merge normalized tables into the analytical table.
///
/// Output rows follow the order of `deaths`. A death row survives only when
/// its (country, year) has a positive population total and its deaths value
/// is present; alcohol is optional.
pub fn merge(
    deaths: &[DeathRecord],
    population: &[PopulationRecord],
    alcohol: &[AlcoholRecord],
    resolver: &ContinentResolver,
) -> MergeOutput {
    let span = tracing::info_span!("merge", death_rows = deaths.len());
    let _guard = span.enter();
    let start = Instant::now();

    let totals = totals_by_country_year(population);
    let mut consumption: BTreeMap<CountryYear, Option<f64>> = BTreeMap::new();
    for record in alcohol {
        consumption
            .entry(record.key())
            .or_insert(record.liters_per_capita);
    }

    let mut stats = MergeStats {
        rows_in: deaths.len(),
        ..MergeStats::default()
    };
    let mut joined = Vec::with_capacity(deaths.len());
    for record in deaths {
        let key = record.key();
        let Some(&population_total) = totals.get(&key) else {
            stats.missing_population += 1;
            continue;
        };
        if population_total <= 0 {
            stats.non_positive_population += 1;
            continue;
        }
        let Some(deaths) = record.deaths else {
            stats.missing_deaths += 1;
            continue;
        };
        let Some(rate) = death_rate_per_100k(deaths, population_total) else {
            stats.invalid_deaths += 1;
            continue;
        };
        let alcohol_consumption_liters = consumption.get(&key).copied().flatten();
        if alcohol_consumption_liters.is_some() {
            stats.with_alcohol += 1;
        }
        joined.push((record, deaths, population_total, rate, alcohol_consumption_liters));
    }

    let countries: BTreeSet<&str> = joined
        .iter()
        .map(|(record, ..)| record.country.as_str())
        .collect();
    let continents = resolver.resolve_all(countries);

    let records: Vec<MergedRecord> = joined
        .into_iter()
        .map(|(record, deaths, population_total, rate, alcohol)| MergedRecord {
            continent: continents
                .get(&record.country)
                .copied()
                .unwrap_or_else(|| resolver.resolve(&record.country)),
            country: record.country.clone(),
            year: record.year,
            cause: record.cause.clone(),
            deaths,
            population_total,
            death_rate_per_100k: rate,
            alcohol_consumption_liters: alcohol,
        })
        .collect();
    stats.rows_out = records.len();

    tracing::debug!(
        missing_population = stats.missing_population,
        non_positive_population = stats.non_positive_population,
        missing_deaths = stats.missing_deaths,
        invalid_deaths = stats.invalid_deaths,
        "merge drops"
    );
    tracing::info!(
        rows_in = stats.rows_in,
        rows_out = stats.rows_out,
        with_alcohol = stats.with_alcohol,
        duration_ms = start.elapsed().as_millis(),
        "tables merged"
    );
    MergeOutput { records, stats }
}
