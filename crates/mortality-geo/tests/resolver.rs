//! Tests for continent resolution against the embedded tables.

use std::io::Write;

use mortality_geo::{ContinentResolver, CountryAliases, Resolution};
use mortality_model::Continent;
use tempfile::NamedTempFile;

fn resolver() -> ContinentResolver {
    ContinentResolver::embedded().expect("embedded tables")
}

#[test]
fn every_input_yields_a_continent() {
    let resolver = resolver();
    for country in ["Germany", "Timor-Leste", "Atlantis", "", "  ", "Holy See"] {
        let continent = resolver.resolve(country);
        assert!(!continent.name().is_empty());
    }
}

#[test]
fn resolves_primary_override_and_fallback() {
    let resolver = resolver();
    assert_eq!(resolver.resolve("Timor-Leste"), Continent::Asia);
    assert_eq!(resolver.resolve("Germany"), Continent::Europe);
    assert_eq!(resolver.resolve("Atlantis"), Continent::Other);
}

#[test]
fn population_dataset_names_resolve_through_overrides() {
    let resolver = resolver();
    for (country, expected) in [
        ("Bolivia (Plurinational State of)", Continent::SouthAmerica),
        ("China, Taiwan Province of China", Continent::Asia),
        ("Kosovo (under UNSC res. 1244)", Continent::Europe),
        ("Micronesia (Fed. States of)", Continent::Oceania),
        ("Wallis and Futuna Islands", Continent::Oceania),
    ] {
        assert!(
            matches!(resolver.resolution(country), Resolution::Override(c, _) if c == expected),
            "{country}"
        );
    }
}

#[test]
fn resolution_is_stable_across_calls() {
    let resolver = resolver();
    let first: Vec<Continent> = ["Peru", "Japan", "Nowhere"]
        .iter()
        .map(|c| resolver.resolve(c))
        .collect();
    let second: Vec<Continent> = ["Peru", "Japan", "Nowhere"]
        .iter()
        .map(|c| resolver.resolve(c))
        .collect();
    assert_eq!(first, second);
}

#[test]
fn canonical_names_of_aliases_resolve() {
    let resolver = resolver();
    let aliases = CountryAliases::embedded().unwrap();
    for alias in [
        "United States of America",
        "Viet Nam",
        "Republic of Korea",
        "Timor-Leste",
        "State of Palestine",
    ] {
        let canonical = aliases.canonical(alias);
        assert_ne!(
            resolver.resolve(canonical),
            Continent::Other,
            "{alias} -> {canonical}"
        );
    }
}

#[test]
fn external_override_file_is_layered() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "country,continent\nAtlantis,Europe\nTimor-Leste,Oceania\n").unwrap();

    let resolver = resolver().with_override_file(file.path()).unwrap();
    assert_eq!(resolver.resolve("Atlantis"), Continent::Europe);
    assert_eq!(resolver.resolve("Timor-Leste"), Continent::Oceania);
    // The taxonomy still comes first.
    assert_eq!(resolver.resolve("Germany"), Continent::Europe);
}

#[test]
fn missing_override_file_is_an_error() {
    let result = resolver().with_override_file(std::path::Path::new("/no/such/file.csv"));
    assert!(result.is_err());
}
