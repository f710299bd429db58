//! Tests for loading the three source files from disk.

use std::fs;
use std::path::Path;

use mortality_ingest::{
    IngestError, SourceFiles, SourceKind, f64_values, load_source, load_sources,
};
use tempfile::TempDir;

const DEATHS: &str = "Country/Territory,Code,Year,Malaria,Tuberculosis\n\
Chile,CHL,2000,1,12\n\
Chile,CHL,2001,,x\n";

const POPULATION: &str = "Location,Time,Variant,LocTypeID,AgeGrp,PopMale,PopFemale,PopTotal\n\
Chile,2000,Medium,4,0-4,10,11,21\n";

const ALCOHOL: &str = "Entity,Code,Year,\"Total alcohol consumption per capita (liters of pure alcohol, projected estimates, 15+ years of age)\"\n\
Chile,CHL,2000,7.5\n";

fn write_sources(dir: &Path, deaths: &str, population: &str, alcohol: &str) -> SourceFiles {
    let files = SourceFiles::in_dir(dir);
    fs::write(&files.deaths, deaths).unwrap();
    fs::write(&files.population, population).unwrap();
    fs::write(&files.alcohol, alcohol).unwrap();
    files
}

#[test]
fn loads_all_three_sources() {
    let dir = TempDir::new().unwrap();
    let files = write_sources(dir.path(), DEATHS, POPULATION, ALCOHOL);

    let raw = load_sources(&files).unwrap();
    assert_eq!(raw.deaths.height(), 2);
    assert_eq!(raw.deaths.width(), 5);
    assert_eq!(raw.population.height(), 1);
    assert_eq!(raw.alcohol.width(), 4);
}

#[test]
fn non_numeric_cells_load_as_missing() {
    let dir = TempDir::new().unwrap();
    let files = write_sources(dir.path(), DEATHS, POPULATION, ALCOHOL);

    let deaths = load_source(SourceKind::Deaths, &files.deaths).unwrap();
    assert_eq!(
        f64_values(&deaths, "Tuberculosis").unwrap(),
        vec![Some(12.0), None]
    );
    assert_eq!(f64_values(&deaths, "Malaria").unwrap(), vec![Some(1.0), None]);
}

#[test]
fn missing_required_column_is_fatal() {
    let dir = TempDir::new().unwrap();
    let population = "Location,Time,Variant,AgeGrp,PopMale,PopFemale,PopTotal\nChile,2000,Medium,0-4,1,1,2\n";
    let files = write_sources(dir.path(), DEATHS, population, ALCOHOL);

    let err = load_sources(&files).unwrap_err();
    assert!(err.is_schema_error());
    match err {
        IngestError::MissingColumn {
            column,
            source_name,
            ..
        } => {
            assert_eq!(column, "LocTypeID");
            assert_eq!(source_name, "population");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn schema_is_checked_before_loading() {
    let dir = TempDir::new().unwrap();
    // The alcohol file lacks its measurement column; the population file is
    // never parsed in full.
    let files = write_sources(dir.path(), DEATHS, POPULATION, "Entity,Year\nChile,2000\n");

    let err = load_sources(&files).unwrap_err();
    assert!(matches!(
        err,
        IngestError::MissingColumn {
            source_name: "alcohol",
            ..
        }
    ));
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let files = SourceFiles::in_dir(dir.path());
    let err = load_sources(&files).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
