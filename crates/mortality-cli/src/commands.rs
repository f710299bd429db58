//! Command implementations: run the pipeline, then build a report.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use mortality_ingest::{SourceFiles, data_root, ensure_dir};
use mortality_model::Continent;
use mortality_transform::analysis::{
    AlcoholCorrelation, RankShift, RateChange, RecordFilter, alcohol_correlation, linear_fit,
    overall_rate_by_year, rank_shift, rate_change, records_per_year, top_countries,
};
use mortality_transform::{HarmonizedData, MergeStats, Pipeline, PipelineOptions};
use serde::Serialize;

/// Source locations and options of one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub files: SourceFiles,
    pub options: PipelineOptions,
}

/// Explicit paths and switches as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SourceSelection {
    pub data_dir: Option<PathBuf>,
    pub deaths: Option<PathBuf>,
    pub population: Option<PathBuf>,
    pub alcohol: Option<PathBuf>,
    pub overrides: Option<PathBuf>,
    pub reconcile_names: bool,
    pub parallel: bool,
}

impl RunConfig {
    /// Explicit file paths win over `data_dir`, which wins over the
    /// environment default.
    pub fn from_selection(selection: SourceSelection) -> Result<Self> {
        let explicit_all = selection.deaths.is_some()
            && selection.population.is_some()
            && selection.alcohol.is_some();
        let dir = selection.data_dir.unwrap_or_else(data_root);
        if !explicit_all {
            ensure_dir(&dir)
                .with_context(|| format!("data directory {} is not usable", dir.display()))?;
        }
        let defaults = SourceFiles::in_dir(&dir);
        let files = SourceFiles::new(
            selection.deaths.unwrap_or(defaults.deaths),
            selection.population.unwrap_or(defaults.population),
            selection.alcohol.unwrap_or(defaults.alcohol),
        );

        let mut options = PipelineOptions::default()
            .with_reconcile_names(selection.reconcile_names)
            .with_parallel(selection.parallel);
        if let Some(path) = selection.overrides {
            options = options.with_override_file(path);
        }
        Ok(Self { files, options })
    }
}

/// Run the harmonization pipeline.
pub fn harmonize(config: &RunConfig) -> Result<HarmonizedData> {
    let pipeline =
        Pipeline::new(config.options.clone()).context("failed to prepare reference tables")?;
    pipeline
        .run_files(&config.files)
        .context("failed to harmonize source data")
}

/// Human-readable scope of a filter.
pub fn scope_label(filter: &RecordFilter) -> String {
    match (&filter.continent, &filter.country) {
        (None, None) => "World wide".to_string(),
        (Some(continent), None) => continent.to_string(),
        (None, Some(country)) => country.clone(),
        (Some(continent), Some(country)) => format!("{country} ({continent})"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinentCount {
    pub continent: Continent,
    pub countries: usize,
}

/// Overview of one harmonization run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub merged_rows: usize,
    pub death_rows: usize,
    pub population_rows: usize,
    pub alcohol_rows: usize,
    pub countries: usize,
    pub causes: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub stats: MergeStats,
    pub continents: Vec<ContinentCount>,
    pub records_per_year: Vec<YearCount>,
    pub top_countries: Vec<CountryCount>,
}

pub fn summary(data: &HarmonizedData, top: usize) -> SummaryReport {
    let countries = data.countries();
    let mut by_continent: BTreeMap<Continent, usize> = BTreeMap::new();
    for country in &countries {
        *by_continent.entry(data.continent_of(country)).or_insert(0) += 1;
    }
    SummaryReport {
        merged_rows: data.merged.len(),
        death_rows: data.deaths.len(),
        population_rows: data.population.len(),
        alcohol_rows: data.alcohol.len(),
        countries: countries.len(),
        causes: data.causes.len(),
        first_year: data.years.first().copied(),
        last_year: data.years.last().copied(),
        stats: data.stats,
        continents: by_continent
            .into_iter()
            .map(|(continent, countries)| ContinentCount {
                continent,
                countries,
            })
            .collect(),
        records_per_year: records_per_year(&data.merged)
            .into_iter()
            .map(|(year, records)| YearCount { year, records })
            .collect(),
        top_countries: top_countries(&data.merged, top)
            .into_iter()
            .map(|(country, records)| CountryCount { country, records })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CausesReport {
    pub causes: Vec<String>,
}

pub fn causes(data: &HarmonizedData) -> CausesReport {
    CausesReport {
        causes: data.causes.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearsReport {
    pub years: Vec<i32>,
}

pub fn years(data: &HarmonizedData) -> YearsReport {
    YearsReport {
        years: data.years.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRate {
    pub year: i32,
    pub rate_per_100k: f64,
}

/// Per-cause rate changes plus the overall rate trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendsReport {
    pub scope: String,
    pub from: i32,
    pub to: i32,
    pub changes: Vec<RateChange>,
    pub overall: Vec<YearRate>,
    /// Least-squares change of the overall rate per year.
    pub slope_per_year: Option<f64>,
}

pub fn trends(data: &HarmonizedData, from: i32, to: i32, filter: &RecordFilter) -> TrendsReport {
    let overall: Vec<YearRate> = overall_rate_by_year(&data.merged, filter)
        .into_iter()
        .map(|(year, rate_per_100k)| YearRate {
            year,
            rate_per_100k,
        })
        .collect();
    let points: Vec<(f64, f64)> = overall
        .iter()
        .map(|point| (f64::from(point.year), point.rate_per_100k))
        .collect();
    TrendsReport {
        scope: scope_label(filter),
        from,
        to,
        changes: rate_change(&data.merged, from, to, filter),
        slope_per_year: linear_fit(&points).map(|(slope, _)| slope),
        overall,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationReport {
    pub scope: String,
    pub pattern: String,
    #[serde(flatten)]
    pub correlation: AlcoholCorrelation,
}

pub fn correlate(data: &HarmonizedData, pattern: &str, filter: &RecordFilter) -> CorrelationReport {
    CorrelationReport {
        scope: scope_label(filter),
        pattern: pattern.to_string(),
        correlation: alcohol_correlation(&data.merged, pattern, filter),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankShiftReport {
    pub scope: String,
    pub from: i32,
    pub to: i32,
    pub top: usize,
    pub shifts: Vec<RankShift>,
}

pub fn rank_shifts(
    data: &HarmonizedData,
    from: i32,
    to: i32,
    top: usize,
    filter: &RecordFilter,
) -> RankShiftReport {
    RankShiftReport {
        scope: scope_label(filter),
        from,
        to,
        top,
        shifts: rank_shift(&data.merged, from, to, top, filter),
    }
}

