//! Tests for aggregations over merged records.

use mortality_model::{Continent, MergedRecord};
use mortality_transform::analysis::{
    ChangeBand, MIN_CORRELATION_PAIRS, RecordFilter, alcohol_correlation,
    deaths_by_cause_and_year, overall_rate_by_year, rank_shift, rate_change, records_per_year,
    top_countries,
};

fn row(country: &str, year: i32, cause: &str, deaths: f64, continent: Continent) -> MergedRecord {
    let population_total = 100_000;
    MergedRecord {
        country: country.to_string(),
        year,
        cause: cause.to_string(),
        deaths,
        population_total,
        death_rate_per_100k: deaths / population_total as f64 * 100_000.0,
        alcohol_consumption_liters: None,
        continent,
    }
}

fn sample() -> Vec<MergedRecord> {
    use Continent::{Africa, Europe};
    vec![
        row("Germany", 1990, "Stroke", 100.0, Europe),
        row("Germany", 2019, "Stroke", 50.0, Europe),
        row("Germany", 1990, "Drowning", 10.0, Europe),
        row("Germany", 2019, "Drowning", 2.0, Europe),
        row("Germany", 1990, "Malaria", 1.0, Europe),
        row("Germany", 2019, "Malaria", 3.0, Europe),
        row("Kenya", 1990, "Malaria", 40.0, Africa),
        row("Kenya", 2019, "Malaria", 30.0, Africa),
        row("Kenya", 2019, "Stroke", 5.0, Africa),
    ]
}

#[test]
fn test_records_per_year_and_top_countries() {
    let records = sample();
    assert_eq!(records_per_year(&records), vec![(1990, 4), (2019, 5)]);
    assert_eq!(
        top_countries(&records, 5),
        vec![("Germany".to_string(), 6), ("Kenya".to_string(), 3)]
    );
    assert_eq!(top_countries(&records, 1).len(), 1);
}

#[test]
fn test_deaths_by_cause_and_year() {
    let totals = deaths_by_cause_and_year(&sample(), &RecordFilter::all());
    assert_eq!(totals["Malaria"][&1990], 41.0);
    assert_eq!(totals["Malaria"][&2019], 33.0);

    let africa = deaths_by_cause_and_year(&sample(), &RecordFilter::continent(Continent::Africa));
    assert_eq!(africa.len(), 2);
    assert!(!africa["Stroke"].contains_key(&1990));
}

#[test]
fn test_overall_rate_counts_population_once() {
    let rates = overall_rate_by_year(&sample(), &RecordFilter::country("Germany"));
    // 111 deaths over 100,000 people, not 300,000.
    assert_eq!(rates.len(), 2);
    assert_eq!(rates[0].0, 1990);
    assert!((rates[0].1 - 111.0).abs() < 1e-9);
    assert!((rates[1].1 - 55.0).abs() < 1e-9);
}

#[test]
fn test_rate_change_sorted_and_banded() {
    let changes = rate_change(&sample(), 1990, 2019, &RecordFilter::continent(Continent::Europe));

    let causes: Vec<&str> = changes.iter().map(|c| c.cause.as_str()).collect();
    assert_eq!(causes, vec!["Malaria", "Stroke", "Drowning"]);
    assert_eq!(changes[0].change_pct, 200.0);
    assert_eq!(changes[0].band, ChangeBand::Increase);
    assert_eq!(changes[1].band, ChangeBand::ModerateDecrease);
    assert_eq!(changes[2].change_pct, -80.0);
    assert_eq!(changes[2].band, ChangeBand::HugeDecrease);
}

#[test]
fn test_rate_change_skips_causes_missing_a_year() {
    let changes = rate_change(&sample(), 1990, 2019, &RecordFilter::country("Kenya"));
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].cause, "Malaria");
    assert_eq!(changes[0].band, ChangeBand::SlightDecrease);
}

#[test]
fn test_rank_shift() {
    let shifts = rank_shift(&sample(), 1990, 2019, 2, &RecordFilter::all());

    // 1990: Stroke 100, Malaria 41, Drowning 10
    // 2019: Stroke 55, Malaria 33, Drowning 2
    let summary: Vec<(&str, usize, usize)> = shifts
        .iter()
        .map(|s| (s.cause.as_str(), s.rank_from, s.rank_to))
        .collect();
    assert_eq!(summary, vec![("Stroke", 1, 1), ("Malaria", 2, 2)]);
    assert_eq!(shifts[0].places_gained(), 0);
}

#[test]
fn test_alcohol_correlation() {
    let mut records = Vec::new();
    for (idx, liters) in [2.0, 4.0, 6.0, 8.0, 10.0].into_iter().enumerate() {
        let mut record = row(
            "Germany",
            2000 + idx as i32,
            "Alcohol use disorders",
            liters * 3.0,
            Continent::Europe,
        );
        record.alcohol_consumption_liters = Some(liters);
        records.push(record);
    }
    records.push(row("Germany", 2010, "Alcohol use disorders", 99.0, Continent::Europe));

    let result = alcohol_correlation(&records, "alcohol", &RecordFilter::all());
    assert_eq!(result.causes, vec!["Alcohol use disorders"]);
    assert_eq!(result.pairs, MIN_CORRELATION_PAIRS);
    let r = result.coefficient.unwrap();
    assert!((r - 1.0).abs() < 1e-9);

    let too_few = alcohol_correlation(&records[..3], "ALCOHOL", &RecordFilter::all());
    assert_eq!(too_few.pairs, 3);
    assert_eq!(too_few.coefficient, None);
}
