//! End-to-end harmonization run.
//!
//! ```text
//! raw sources ─┬─ population::normalize ─┐
//!              ├─ deaths::reshape ───────┼─ reconcile ─ merge ─ HarmonizedData
//!              └─ alcohol::extract ──────┘
//! ```
//!
//! The three normalizers are independent and run on scoped threads when
//! [`PipelineOptions::parallel`] is set. The merge waits for all of them.

use std::collections::{BTreeMap, BTreeSet};
use std::thread;
use std::time::Instant;

use mortality_geo::{ContinentOverrides, ContinentResolver, CountryAliases, CountryTaxonomy};
use mortality_ingest::{RawSources, SourceFiles, load_sources};
use mortality_model::{AlcoholRecord, Continent, DeathRecord, MergedRecord, PopulationRecord};
use polars::prelude::DataFrame;

use crate::deaths::ReshapedDeaths;
use crate::error::{Result, TransformError};
use crate::merge::{MergeStats, merge};
use crate::options::PipelineOptions;
use crate::reconcile::reconcile;
use crate::{alcohol, deaths, frame, population};

/// Output of a harmonization run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HarmonizedData {
    /// The analytical table, in death-table order.
    pub merged: Vec<MergedRecord>,
    /// Age-stratified population, head counts.
    pub population: Vec<PopulationRecord>,
    /// Long-form deaths, including rows the merge dropped.
    pub deaths: Vec<DeathRecord>,
    /// Alcohol consumption averaged per (country, year).
    pub alcohol: Vec<AlcoholRecord>,
    /// Sorted cause names from the death table header.
    pub causes: Vec<String>,
    /// Sorted distinct years of the merged table.
    pub years: Vec<i32>,
    pub stats: MergeStats,
    /// Continent of every country in the merged and population tables.
    pub continents: BTreeMap<String, Continent>,
}

impl HarmonizedData {
    /// Continent of `country` as resolved during the run.
    pub fn continent_of(&self, country: &str) -> Continent {
        self.continents
            .get(country)
            .copied()
            .unwrap_or(Continent::Other)
    }

    /// The population table with each row's continent.
    pub fn population_with_continents(&self) -> Vec<(&PopulationRecord, Continent)> {
        self.population
            .iter()
            .map(|record| (record, self.continent_of(&record.country)))
            .collect()
    }

    /// Sorted distinct countries of the merged table.
    pub fn countries(&self) -> Vec<&str> {
        self.merged
            .iter()
            .map(|record| record.country.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn merged_frame(&self) -> Result<DataFrame> {
        frame::merged_to_frame(&self.merged)
    }

    pub fn population_frame(&self) -> Result<DataFrame> {
        let continents: Vec<Continent> = self
            .population
            .iter()
            .map(|record| self.continent_of(&record.country))
            .collect();
        frame::population_to_frame(&self.population, Some(&continents))
    }

    pub fn deaths_frame(&self) -> Result<DataFrame> {
        frame::deaths_to_frame(&self.deaths)
    }

    pub fn alcohol_frame(&self) -> Result<DataFrame> {
        frame::alcohol_to_frame(&self.alcohol)
    }
}

/// Sorted distinct years of `records`.
pub fn distinct_years(records: &[MergedRecord]) -> Vec<i32> {
    records
        .iter()
        .map(|record| record.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Outputs of the three normalizers, before reconciliation.
struct Normalized {
    population: Vec<PopulationRecord>,
    deaths: ReshapedDeaths,
    alcohol_rows: Vec<AlcoholRecord>,
}

/// A configured harmonization pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: PipelineOptions,
    resolver: ContinentResolver,
    aliases: CountryAliases,
}

impl Pipeline {
    /// Build a pipeline from the embedded reference tables plus the optional
    /// override file named in `options`.
    pub fn new(options: PipelineOptions) -> Result<Self> {
        options.validate()?;
        let mut resolver = ContinentResolver::embedded()?;
        if let Some(path) = &options.override_file {
            resolver = resolver.with_override_file(path)?;
        }
        let aliases = if options.reconcile_names {
            CountryAliases::embedded()?
        } else {
            CountryAliases::default()
        };
        Ok(Self {
            options,
            resolver,
            aliases,
        })
    }

    /// Build a pipeline with explicit reference tables.
    pub fn with_tables(
        options: PipelineOptions,
        taxonomy: CountryTaxonomy,
        overrides: ContinentOverrides,
        aliases: CountryAliases,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            resolver: ContinentResolver::new(taxonomy, overrides),
            aliases,
        })
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn resolver(&self) -> &ContinentResolver {
        &self.resolver
    }

    /// Load the three source files and harmonize them.
    pub fn run_files(&self, files: &SourceFiles) -> Result<HarmonizedData> {
        let raw = load_sources(files)?;
        self.run(&raw)
    }

    /// Harmonize already loaded sources.
    pub fn run(&self, raw: &RawSources) -> Result<HarmonizedData> {
        let span = tracing::info_span!("harmonize", parallel = self.options.parallel);
        let _guard = span.enter();
        let start = Instant::now();

        let normalized = if self.options.parallel {
            self.normalize_parallel(raw)?
        } else {
            self.normalize_sequential(raw)?
        };

        let (population, deaths, alcohol) = if self.options.reconcile_names {
            let (population, renamed_population) =
                reconcile(&normalized.population, &self.aliases);
            let (deaths, renamed_deaths) = reconcile(&normalized.deaths.records, &self.aliases);
            let (alcohol_rows, renamed_alcohol) =
                reconcile(&normalized.alcohol_rows, &self.aliases);
            tracing::debug!(
                population = renamed_population,
                deaths = renamed_deaths,
                alcohol = renamed_alcohol,
                "country names reconciled"
            );
            (population, deaths, alcohol::collapse(&alcohol_rows))
        } else {
            let alcohol = alcohol::collapse(&normalized.alcohol_rows);
            (normalized.population, normalized.deaths.records, alcohol)
        };

        let output = merge(&deaths, &population, &alcohol, &self.resolver);
        let years = distinct_years(&output.records);

        let mut continents: BTreeMap<String, Continent> = output
            .records
            .iter()
            .map(|record| (record.country.clone(), record.continent))
            .collect();
        let unmerged: BTreeSet<&str> = population
            .iter()
            .map(|record| record.country.as_str())
            .filter(|country| !continents.contains_key(*country))
            .collect();
        continents.extend(self.resolver.resolve_all(unmerged));

        tracing::info!(
            merged = output.records.len(),
            causes = normalized.deaths.causes.len(),
            years = years.len(),
            countries = continents.len(),
            duration_ms = start.elapsed().as_millis(),
            "harmonization complete"
        );

        Ok(HarmonizedData {
            merged: output.records,
            population,
            deaths,
            alcohol,
            causes: normalized.deaths.causes,
            years,
            stats: output.stats,
            continents,
        })
    }

    fn normalize_sequential(&self, raw: &RawSources) -> Result<Normalized> {
        Ok(Normalized {
            population: population::normalize(&raw.population, &self.options)?,
            deaths: deaths::reshape(&raw.deaths)?,
            alcohol_rows: alcohol::extract(&raw.alcohol, &self.options)?,
        })
    }

    fn normalize_parallel(&self, raw: &RawSources) -> Result<Normalized> {
        let options = &self.options;
        let span = tracing::Span::current();
        thread::scope(|scope| {
            let population = scope.spawn(|| {
                span.in_scope(|| population::normalize(&raw.population, options))
            });
            let deaths = scope.spawn(|| span.in_scope(|| deaths::reshape(&raw.deaths)));
            let alcohol =
                scope.spawn(|| span.in_scope(|| alcohol::extract(&raw.alcohol, options)));

            let population = population
                .join()
                .map_err(|_| TransformError::WorkerPanicked { stage: "population" })??;
            let deaths = deaths
                .join()
                .map_err(|_| TransformError::WorkerPanicked { stage: "deaths" })??;
            let alcohol_rows = alcohol
                .join()
                .map_err(|_| TransformError::WorkerPanicked { stage: "alcohol" })??;
            Ok(Normalized {
                population,
                deaths,
                alcohol_rows,
            })
        })
    }
}

/// Harmonize the source files with default reference tables.
pub fn run(files: &SourceFiles, options: PipelineOptions) -> Result<HarmonizedData> {
    Pipeline::new(options)?.run_files(files)
}
