//! Country-name reconciliation of normalized tables.
//!
//! The three sources spell some countries differently (`Viet Nam` against
//! `Vietnam`). Before the merge every table is rewritten to the canonical
//! spelling so that the (country, year) join sees one key per country.

use mortality_geo::CountryAliases;
use mortality_model::{AlcoholRecord, DeathRecord, PopulationRecord};

/// A record keyed by a country name.
pub trait CountryKeyed: Clone {
    fn country(&self) -> &str;
    fn set_country(&mut self, country: String);
}

impl CountryKeyed for DeathRecord {
    fn country(&self) -> &str {
        &self.country
    }

    fn set_country(&mut self, country: String) {
        self.country = country;
    }
}

impl CountryKeyed for PopulationRecord {
    fn country(&self) -> &str {
        &self.country
    }

    fn set_country(&mut self, country: String) {
        self.country = country;
    }
}

impl CountryKeyed for AlcoholRecord {
    fn country(&self) -> &str {
        &self.country
    }

    fn set_country(&mut self, country: String) {
        self.country = country;
    }
}

/// A copy of `records` with every country name in canonical spelling.
///
/// Returns the rewritten table and the number of rows whose name changed.
pub fn reconcile<T: CountryKeyed>(records: &[T], aliases: &CountryAliases) -> (Vec<T>, usize) {
    let mut renamed = 0usize;
    let rewritten = records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            let canonical = aliases.canonical(record.country());
            if canonical != record.country() {
                let canonical = canonical.to_string();
                record.set_country(canonical);
                renamed += 1;
            }
            record
        })
        .collect();
    (rewritten, renamed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_known_variants_only() {
        let aliases = CountryAliases::from_csv_str(
            "alias,canonical\nViet Nam,Vietnam\n",
            "aliases.csv",
        )
        .unwrap();
        let rows = vec![
            AlcoholRecord {
                country: "Viet Nam".to_string(),
                year: 2005,
                liters_per_capita: Some(3.0),
            },
            AlcoholRecord {
                country: "Chile".to_string(),
                year: 2005,
                liters_per_capita: None,
            },
        ];

        let (rewritten, renamed) = reconcile(&rows, &aliases);
        assert_eq!(renamed, 1);
        assert_eq!(rewritten[0].country, "Vietnam");
        assert_eq!(rewritten[1].country, "Chile");
        assert_eq!(rows[0].country, "Viet Nam");
    }
}
