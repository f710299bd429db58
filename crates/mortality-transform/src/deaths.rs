//! Wide-to-long reshaping of the death-by-cause table.

use std::collections::BTreeSet;
use std::time::Instant;

use mortality_ingest::{f64_values, i64_values, string_values};
use mortality_model::DeathRecord;
use mortality_model::columns::{DEATHS_COUNTRY, DEATHS_KEY_COLUMNS, DEATHS_YEAR};
use polars::prelude::DataFrame;

use crate::error::Result;

/// The long-form death table together with the causes it was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReshapedDeaths {
    pub records: Vec<DeathRecord>,
    /// Sorted cause column names, including causes with no numeric value.
    pub causes: Vec<String>,
}

/// Every column that is not a key column, sorted.
pub fn cause_columns(raw: &DataFrame) -> Vec<String> {
    let mut causes: Vec<String> = raw
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .filter(|name| !DEATHS_KEY_COLUMNS.contains(&name.as_str()))
        .collect();
    causes.sort();
    causes
}

/// Unpivot the wide death table into one record per (source row, cause).
///
/// Records are grouped by cause in sorted order, and follow source row order
/// within a cause. Non-numeric death cells become `None`. Source rows without
/// a country or a usable year cannot be joined and are skipped.
pub fn reshape(raw: &DataFrame) -> Result<ReshapedDeaths> {
    let span = tracing::info_span!("reshape_deaths", rows_in = raw.height());
    let _guard = span.enter();
    let start = Instant::now();

    let countries = string_values(raw, DEATHS_COUNTRY)?;
    let years = i64_values(raw, DEATHS_YEAR)?;
    let keys: Vec<Option<(String, i32)>> = countries
        .into_iter()
        .zip(years)
        .map(|(country, year)| Some((country?, i32::try_from(year?).ok()?)))
        .collect();
    let unkeyed = keys.iter().filter(|key| key.is_none()).count();
    if unkeyed > 0 {
        tracing::debug!(unkeyed, "death rows without country or year skipped");
    }

    let causes = cause_columns(raw);
    let mut records = Vec::with_capacity(causes.len() * (keys.len() - unkeyed));
    let mut missing = 0usize;
    for cause in &causes {
        let values = f64_values(raw, cause)?;
        for (key, deaths) in keys.iter().zip(values) {
            let Some((country, year)) = key else {
                continue;
            };
            if deaths.is_none() {
                missing += 1;
            }
            records.push(DeathRecord {
                country: country.clone(),
                year: *year,
                cause: cause.clone(),
                deaths,
            });
        }
    }

    tracing::debug!(missing, "death cells without a numeric value");
    tracing::info!(
        causes = causes.len(),
        rows_out = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "deaths reshaped"
    );
    Ok(ReshapedDeaths { records, causes })
}

/// Sorted distinct causes present in `records`.
pub fn distinct_causes(records: &[DeathRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.cause.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}
