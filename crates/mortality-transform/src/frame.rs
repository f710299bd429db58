//! Conversion of harmonized tables into Polars DataFrames.
//!
//! Column names are the canonical names from
//! [`mortality_model::columns`].

use mortality_model::columns::{
    AGE_GROUP, ALCOHOL_CONSUMPTION, CAUSE, CONTINENT, COUNTRY, DEATH_RATE, DEATHS,
    POPULATION_FEMALE, POPULATION_MALE, POPULATION_TOTAL, YEAR,
};
use mortality_model::{AlcoholRecord, Continent, DeathRecord, MergedRecord, PopulationRecord};
use polars::prelude::*;

use crate::error::Result;

fn text_column<'a, T: 'a>(name: &str, rows: &'a [T], f: impl Fn(&'a T) -> &'a str) -> Column {
    Column::new(name.into(), rows.iter().map(f).collect::<Vec<&str>>())
}

fn year_column<T>(rows: &[T], f: impl Fn(&T) -> i32) -> Column {
    Column::new(YEAR.into(), rows.iter().map(f).collect::<Vec<i32>>())
}

/// The merged analytical table.
pub fn merged_to_frame(records: &[MergedRecord]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        text_column(COUNTRY, records, |r| r.country.as_str()),
        year_column(records, |r| r.year),
        text_column(CAUSE, records, |r| r.cause.as_str()),
        Column::new(
            DEATHS.into(),
            records.iter().map(|r| r.deaths).collect::<Vec<f64>>(),
        ),
        Column::new(
            POPULATION_TOTAL.into(),
            records
                .iter()
                .map(|r| r.population_total)
                .collect::<Vec<i64>>(),
        ),
        Column::new(
            DEATH_RATE.into(),
            records
                .iter()
                .map(|r| r.death_rate_per_100k)
                .collect::<Vec<f64>>(),
        ),
        Column::new(
            ALCOHOL_CONSUMPTION.into(),
            records
                .iter()
                .map(|r| r.alcohol_consumption_liters)
                .collect::<Vec<Option<f64>>>(),
        ),
        text_column(CONTINENT, records, |r| r.continent.name()),
    ])?;
    Ok(df)
}

/// The long-form death table.
pub fn deaths_to_frame(records: &[DeathRecord]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        text_column(COUNTRY, records, |r| r.country.as_str()),
        year_column(records, |r| r.year),
        text_column(CAUSE, records, |r| r.cause.as_str()),
        Column::new(
            DEATHS.into(),
            records.iter().map(|r| r.deaths).collect::<Vec<Option<f64>>>(),
        ),
    ])?;
    Ok(df)
}

/// The normalized population table, with an optional continent per row.
pub fn population_to_frame(
    records: &[PopulationRecord],
    continents: Option<&[Continent]>,
) -> Result<DataFrame> {
    let mut columns = vec![
        text_column(COUNTRY, records, |r| r.country.as_str()),
        year_column(records, |r| r.year),
        text_column(AGE_GROUP, records, |r| r.age_group.as_str()),
        Column::new(
            POPULATION_MALE.into(),
            records
                .iter()
                .map(|r| r.population_male)
                .collect::<Vec<i64>>(),
        ),
        Column::new(
            POPULATION_FEMALE.into(),
            records
                .iter()
                .map(|r| r.population_female)
                .collect::<Vec<i64>>(),
        ),
        Column::new(
            POPULATION_TOTAL.into(),
            records
                .iter()
                .map(|r| r.population_total)
                .collect::<Vec<i64>>(),
        ),
    ];
    if let Some(continents) = continents {
        columns.push(Column::new(
            CONTINENT.into(),
            continents.iter().map(|c| c.name()).collect::<Vec<&str>>(),
        ));
    }
    Ok(DataFrame::new(columns)?)
}

/// The normalized alcohol table.
pub fn alcohol_to_frame(records: &[AlcoholRecord]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        text_column(COUNTRY, records, |r| r.country.as_str()),
        year_column(records, |r| r.year),
        Column::new(
            ALCOHOL_CONSUMPTION.into(),
            records
                .iter()
                .map(|r| r.liters_per_capita)
                .collect::<Vec<Option<f64>>>(),
        ),
    ])?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_frame_uses_canonical_names() {
        let df = merged_to_frame(&[MergedRecord {
            country: "Germany".to_string(),
            year: 2000,
            cause: "Malaria".to_string(),
            deaths: 100.0,
            population_total: 200_000,
            death_rate_per_100k: 50.0,
            alcohol_consumption_liters: None,
            continent: Continent::Europe,
        }])
        .unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "country",
                "Year",
                "Cause",
                "Deaths",
                "Population_Total",
                "Death_Rate_per_100k",
                "Alcohol_Consumption_Liters",
                "Continent",
            ]
        );
        assert_eq!(df.column("Continent").unwrap().str().unwrap().get(0), Some("Europe"));
        assert_eq!(df.column("Alcohol_Consumption_Liters").unwrap().null_count(), 1);
    }

    #[test]
    fn empty_tables_convert() {
        let df = alcohol_to_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 3);
    }
}
