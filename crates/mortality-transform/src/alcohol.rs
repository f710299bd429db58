//! Alcohol consumption normalization.
//!
//! Normalization runs in two steps so that name reconciliation can happen in
//! between: [`extract`] filters and renames the raw rows, [`collapse`]
//! averages duplicate (country, year) rows. [`normalize`] runs both.

use std::collections::BTreeMap;
use std::time::Instant;

use mortality_ingest::{f64_values, i64_values, string_values};
use mortality_model::columns::{ALCOHOL_ENTITY, ALCOHOL_LITERS, ALCOHOL_YEAR};
use mortality_model::{AlcoholRecord, CountryYear};
use polars::prelude::*;

use crate::error::Result;
use crate::options::PipelineOptions;

/// Filter the raw table to the configured years, one record per source row.
pub fn extract(raw: &DataFrame, options: &PipelineOptions) -> Result<Vec<AlcoholRecord>> {
    let years = options.alcohol_years;
    let year = col(ALCOHOL_YEAR).cast(DataType::Int64);
    let filtered = raw
        .clone()
        .lazy()
        .filter(
            year.clone()
                .gt_eq(lit(i64::from(years.start)))
                .and(year.lt_eq(lit(i64::from(years.end)))),
        )
        .select([col(ALCOHOL_ENTITY), col(ALCOHOL_YEAR), col(ALCOHOL_LITERS)])
        .collect()?;

    let countries = string_values(&filtered, ALCOHOL_ENTITY)?;
    let years = i64_values(&filtered, ALCOHOL_YEAR)?;
    let liters = f64_values(&filtered, ALCOHOL_LITERS)?;

    let records: Vec<AlcoholRecord> = countries
        .into_iter()
        .zip(years)
        .zip(liters)
        .filter_map(|((country, year), liters_per_capita)| {
            Some(AlcoholRecord {
                country: country?,
                year: i32::try_from(year?).ok()?,
                liters_per_capita,
            })
        })
        .collect();

    let skipped = filtered.height() - records.len();
    if skipped > 0 {
        tracing::debug!(skipped, "alcohol rows without country or year skipped");
    }
    Ok(records)
}

/// Average duplicate (country, year) rows.
///
/// Missing values are left out of the mean; a group with no values at all
/// averages to `None`. Output is sorted by (country, year).
pub fn collapse(records: &[AlcoholRecord]) -> Vec<AlcoholRecord> {
    let mut groups: BTreeMap<CountryYear, (f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.key()).or_insert((0.0, 0));
        if let Some(value) = record.liters_per_capita {
            entry.0 += value;
            entry.1 += 1;
        }
    }
    groups
        .into_iter()
        .map(|(key, (sum, count))| AlcoholRecord {
            country: key.country,
            year: key.year,
            liters_per_capita: (count > 0).then(|| sum / count as f64),
        })
        .collect()
}

/// Filter the raw alcohol table and average it per (country, year).
pub fn normalize(raw: &DataFrame, options: &PipelineOptions) -> Result<Vec<AlcoholRecord>> {
    let span = tracing::info_span!("normalize_alcohol", rows_in = raw.height());
    let _guard = span.enter();
    let start = Instant::now();

    let rows = extract(raw, options)?;
    let records = collapse(&rows);

    tracing::info!(
        rows_filtered = rows.len(),
        rows_out = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "alcohol normalized"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, year: i32, liters: Option<f64>) -> AlcoholRecord {
        AlcoholRecord {
            country: country.to_string(),
            year,
            liters_per_capita: liters,
        }
    }

    #[test]
    fn duplicates_are_averaged() {
        let collapsed = collapse(&[
            record("France", 2005, Some(10.0)),
            record("France", 2005, Some(12.0)),
        ]);
        assert_eq!(collapsed, vec![record("France", 2005, Some(11.0))]);
    }

    #[test]
    fn missing_values_do_not_count_as_zero() {
        let collapsed = collapse(&[
            record("Chile", 2001, None),
            record("Chile", 2001, Some(8.0)),
            record("Peru", 2001, None),
        ]);
        assert_eq!(
            collapsed,
            vec![record("Chile", 2001, Some(8.0)), record("Peru", 2001, None)]
        );
    }

    #[test]
    fn output_is_sorted_by_key() {
        let collapsed = collapse(&[
            record("Peru", 2002, Some(1.0)),
            record("Chile", 2003, Some(2.0)),
            record("Chile", 2001, Some(3.0)),
        ]);
        let keys: Vec<(&str, i32)> = collapsed
            .iter()
            .map(|r| (r.country.as_str(), r.year))
            .collect();
        assert_eq!(keys, vec![("Chile", 2001), ("Chile", 2003), ("Peru", 2002)]);
    }
}
