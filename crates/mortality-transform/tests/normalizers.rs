//! Integration tests for the three normalizers.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use mortality_transform::{PipelineOptions, YearRange, alcohol, deaths, population};

fn test_df(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| {
            Series::new(
                name.into(),
                values.iter().copied().map(String::from).collect::<Vec<_>>(),
            )
            .into_column()
        })
        .collect();
    DataFrame::new(cols).unwrap()
}

const ALCOHOL_LITERS: &str = "Total alcohol consumption per capita (liters of pure alcohol, projected estimates, 15+ years of age)";

fn population_df(rows: &[[&str; 8]]) -> DataFrame {
    let names = [
        "Location",
        "Time",
        "Variant",
        "LocTypeID",
        "AgeGrp",
        "PopMale",
        "PopFemale",
        "PopTotal",
    ];
    test_df(
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| (*name, rows.iter().map(|row| row[idx]).collect()))
            .collect(),
    )
}

#[test]
fn test_population_converts_thousands() {
    let raw = population_df(&[["Chile", "2000", "Medium", "4", "0-4", "600", "634", "1234"]]);

    let records = population::normalize(&raw, &PipelineOptions::default()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].population_total, 1_234_000);
    assert_eq!(records[0].population_male, 600_000);
    assert_eq!(records[0].population_female, 634_000);
    assert_eq!(records[0].age_group, "0-4");
}

#[test]
fn test_population_filters_variant_location_and_years() {
    let raw = population_df(&[
        ["Chile", "1989", "Medium", "4", "0-4", "1", "1", "2"],
        ["Chile", "1990", "Medium", "4", "0-4", "1", "1", "2"],
        ["Chile", "2019", "Medium", "4", "0-4", "1", "1", "2"],
        ["Chile", "2020", "Medium", "4", "0-4", "1", "1", "2"],
        ["Chile", "2000", "High", "4", "0-4", "1", "1", "2"],
        ["World", "2000", "Medium", "1", "0-4", "1", "1", "2"],
    ]);

    let records = population::normalize(&raw, &PipelineOptions::default()).unwrap();

    let years: Vec<i32> = records.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![1990, 2019]);
    assert!(records.iter().all(|r| r.country == "Chile"));
}

#[test]
fn test_population_drops_incomplete_rows() {
    let raw = population_df(&[
        ["Chile", "2000", "Medium", "4", "0-4", "1", "1", ""],
        ["Chile", "2000", "Medium", "4", "5-9", "x", "1", "2"],
        ["Chile", "2000", "Medium", "4", "10-14", "1", "1", "2"],
    ]);

    let records = population::normalize(&raw, &PipelineOptions::default()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].age_group, "10-14");
}

#[test]
fn test_population_custom_window() {
    let raw = population_df(&[
        ["Chile", "2000", "Low", "4", "0-4", "1", "1", "2"],
        ["Chile", "2001", "Low", "4", "0-4", "1", "1", "2"],
    ]);
    let options = PipelineOptions::new()
        .with_population_variant("Low")
        .with_population_years(YearRange::new(2001, 2001))
        .with_population_multiplier(1.0);

    let records = population::normalize(&raw, &options).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].population_total, 2);
}

#[test]
fn test_deaths_cause_set_matches_headers() {
    let raw = test_df(vec![
        ("Country/Territory", vec!["Chile", "Chile"]),
        ("Code", vec!["CHL", "CHL"]),
        ("Year", vec!["2000", "2001"]),
        ("Meningitis", vec!["", ""]),
        ("Drowning", vec!["3", "4"]),
    ]);

    let reshaped = deaths::reshape(&raw).unwrap();

    assert_eq!(reshaped.causes, vec!["Drowning", "Meningitis"]);
    assert_eq!(reshaped.records.len(), 4);
    assert_eq!(
        deaths::distinct_causes(&reshaped.records),
        vec!["Drowning", "Meningitis"]
    );
    assert!(
        reshaped
            .records
            .iter()
            .filter(|r| r.cause == "Meningitis")
            .all(|r| r.deaths.is_none())
    );
}

#[test]
fn test_alcohol_averages_duplicates() {
    let raw = test_df(vec![
        ("Entity", vec!["France", "France", "France"]),
        ("Code", vec!["FRA", "FRA", "FRA"]),
        ("Year", vec!["2005", "2005", "1999"]),
        (ALCOHOL_LITERS, vec!["10.0", "12.0", "15.0"]),
    ]);

    let records = alcohol::normalize(&raw, &PipelineOptions::default()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].country, "France");
    assert_eq!(records[0].year, 2005);
    assert_eq!(records[0].liters_per_capita, Some(11.0));
}

#[test]
fn test_alcohol_keeps_missing_values_missing() {
    let raw = test_df(vec![
        ("Entity", vec!["Chad", "Chad"]),
        ("Year", vec!["2010", "2011"]),
        (ALCOHOL_LITERS, vec!["", "0"]),
    ]);

    let records = alcohol::normalize(&raw, &PipelineOptions::default()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].liters_per_capita, None);
    assert_eq!(records[1].liters_per_capita, Some(0.0));
}
