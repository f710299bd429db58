//! Aggregations over the merged table.
//!
//! These are the data-level halves of the exploratory views: each function
//! takes the merged records and returns plain values ready for display.

use std::collections::{BTreeMap, BTreeSet};

use mortality_model::{Continent, MergedRecord, RATE_SCALE};
use serde::Serialize;

/// Fewest (alcohol, rate) pairs for which a correlation is reported.
pub const MIN_CORRELATION_PAIRS: usize = 5;

/// Narrows the merged table to one continent and/or one country.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub continent: Option<Continent>,
    pub country: Option<String>,
}

impl RecordFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn continent(continent: Continent) -> Self {
        Self {
            continent: Some(continent),
            country: None,
        }
    }

    pub fn country(country: impl Into<String>) -> Self {
        Self {
            continent: None,
            country: Some(country.into()),
        }
    }

    pub fn matches(&self, record: &MergedRecord) -> bool {
        self.continent.is_none_or(|c| record.continent == c)
            && self
                .country
                .as_deref()
                .is_none_or(|country| record.country == country)
    }

    fn apply<'a>(&'a self, records: &'a [MergedRecord]) -> impl Iterator<Item = &'a MergedRecord> {
        records.iter().filter(move |record| self.matches(record))
    }
}

/// Number of merged records per year, sorted by year.
pub fn records_per_year(records: &[MergedRecord]) -> Vec<(i32, usize)> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.year).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// The `n` countries with the most merged records; ties sort by name.
pub fn top_countries(records: &[MergedRecord], n: usize) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.country.as_str()).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(country, count)| (country.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Summed deaths per cause and year.
pub fn deaths_by_cause_and_year(
    records: &[MergedRecord],
    filter: &RecordFilter,
) -> BTreeMap<String, BTreeMap<i32, f64>> {
    let mut totals: BTreeMap<String, BTreeMap<i32, f64>> = BTreeMap::new();
    for record in filter.apply(records) {
        *totals
            .entry(record.cause.clone())
            .or_default()
            .entry(record.year)
            .or_insert(0.0) += record.deaths;
    }
    totals
}

/// Death rate of the whole population covered by the merged table, per year.
///
/// Each country's population is counted once per year, however many causes
/// it reports.
pub fn overall_rate_by_year(records: &[MergedRecord], filter: &RecordFilter) -> Vec<(i32, f64)> {
    let mut deaths: BTreeMap<i32, f64> = BTreeMap::new();
    let mut population: BTreeMap<(i32, &str), i64> = BTreeMap::new();
    for record in filter.apply(records) {
        *deaths.entry(record.year).or_insert(0.0) += record.deaths;
        population.insert((record.year, record.country.as_str()), record.population_total);
    }
    let mut totals: BTreeMap<i32, i64> = BTreeMap::new();
    for ((year, _), total) in population {
        *totals.entry(year).or_insert(0) += total;
    }
    deaths
        .into_iter()
        .filter_map(|(year, deaths)| {
            let total = *totals.get(&year)?;
            (total > 0).then(|| (year, deaths / total as f64 * RATE_SCALE))
        })
        .collect()
}

/// Least-squares slope and intercept of `points`.
///
/// `None` with fewer than two points or when every x is equal.
pub fn linear_fit(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;
    let sxx: f64 = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = points.iter().map(|p| (p.0 - mean_x) * (p.1 - mean_y)).sum();
    let slope = sxy / sxx;
    Some((slope, mean_y - slope * mean_x))
}

/// Interpretation of a percentage change in rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeBand {
    /// -75% or lower.
    HugeDecrease,
    /// Above -75%, at most -50%.
    ModerateDecrease,
    /// Above -50%, below zero.
    SlightDecrease,
    /// Zero or higher.
    Increase,
}

impl ChangeBand {
    pub fn classify(change_pct: f64) -> Self {
        if change_pct <= -75.0 {
            Self::HugeDecrease
        } else if change_pct <= -50.0 {
            Self::ModerateDecrease
        } else if change_pct < 0.0 {
            Self::SlightDecrease
        } else {
            Self::Increase
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HugeDecrease => "huge decrease",
            Self::ModerateDecrease => "moderate decrease",
            Self::SlightDecrease => "slight decrease",
            Self::Increase => "increase",
        }
    }
}

/// Change of a cause's summed rate between two years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateChange {
    pub cause: String,
    pub rate_from: f64,
    pub rate_to: f64,
    pub change_pct: f64,
    pub band: ChangeBand,
}

fn summed_rates<'a>(
    records: &'a [MergedRecord],
    filter: &'a RecordFilter,
    years: [i32; 2],
) -> BTreeMap<&'a str, BTreeMap<i32, f64>> {
    let mut sums: BTreeMap<&str, BTreeMap<i32, f64>> = BTreeMap::new();
    for record in filter.apply(records).filter(|r| years.contains(&r.year)) {
        *sums
            .entry(record.cause.as_str())
            .or_default()
            .entry(record.year)
            .or_insert(0.0) += record.death_rate_per_100k;
    }
    sums
}

/// Percentage change of each cause's summed rate from `from` to `to`.
///
/// Causes missing either year, or with a zero rate in `from`, are left out.
/// Sorted by change, largest increase first; ties by cause name.
pub fn rate_change(
    records: &[MergedRecord],
    from: i32,
    to: i32,
    filter: &RecordFilter,
) -> Vec<RateChange> {
    let mut changes: Vec<RateChange> = summed_rates(records, filter, [from, to])
        .into_iter()
        .filter_map(|(cause, by_year)| {
            let rate_from = *by_year.get(&from)?;
            let rate_to = *by_year.get(&to)?;
            if rate_from == 0.0 {
                return None;
            }
            let change_pct = (rate_to - rate_from) / rate_from * 100.0;
            Some(RateChange {
                cause: cause.to_string(),
                rate_from,
                rate_to,
                change_pct,
                band: ChangeBand::classify(change_pct),
            })
        })
        .collect();
    changes.sort_by(|a, b| {
        b.change_pct
            .total_cmp(&a.change_pct)
            .then_with(|| a.cause.cmp(&b.cause))
    });
    changes
}

/// Rank of a cause in two years (1 = highest summed rate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankShift {
    pub cause: String,
    pub rank_from: usize,
    pub rank_to: usize,
}

impl RankShift {
    /// Positive when the cause climbed.
    pub fn places_gained(&self) -> i64 {
        self.rank_from as i64 - self.rank_to as i64
    }
}

/// Competition ranking ("1224"): equal values share the lowest rank.
fn min_ranks<'a>(values: &[(&'a str, f64)]) -> BTreeMap<&'a str, usize> {
    values
        .iter()
        .map(|(cause, value)| {
            let higher = values.iter().filter(|(_, other)| other > value).count();
            (*cause, higher + 1)
        })
        .collect()
}

fn top_causes<'a>(values: &[(&'a str, f64)], n: usize) -> Vec<&'a str> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    sorted.into_iter().take(n).map(|(cause, _)| cause).collect()
}

fn restrict<'a>(values: Vec<(&'a str, f64)>, candidates: &BTreeSet<&str>) -> Vec<(&'a str, f64)> {
    values
        .into_iter()
        .filter(|(cause, _)| candidates.contains(cause))
        .collect()
}

/// How the `top_n` causes of `from` and `to` moved in rank.
///
/// The candidate set is the union of both years' top causes. Ranks are taken
/// within that set and only causes present in both years are returned,
/// sorted by their rank in `from`.
pub fn rank_shift(
    records: &[MergedRecord],
    from: i32,
    to: i32,
    top_n: usize,
    filter: &RecordFilter,
) -> Vec<RankShift> {
    let sums = summed_rates(records, filter, [from, to]);
    let year_values = |year: i32| {
        sums.iter()
            .filter_map(|(cause, by_year)| Some((*cause, *by_year.get(&year)?)))
            .collect::<Vec<(&str, f64)>>()
    };
    let values_from = year_values(from);
    let values_to = year_values(to);

    let candidates: BTreeSet<&str> = top_causes(&values_from, top_n)
        .into_iter()
        .chain(top_causes(&values_to, top_n))
        .collect();
    let ranks_from = min_ranks(&restrict(values_from, &candidates));
    let ranks_to = min_ranks(&restrict(values_to, &candidates));

    let mut shifts: Vec<RankShift> = ranks_from
        .iter()
        .filter_map(|(cause, &rank_from)| {
            Some(RankShift {
                cause: cause.to_string(),
                rank_from,
                rank_to: *ranks_to.get(cause)?,
            })
        })
        .collect();
    shifts.sort_by(|a, b| a.rank_from.cmp(&b.rank_from).then_with(|| a.cause.cmp(&b.cause)));
    shifts
}

/// Pearson correlation between alcohol consumption and death rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlcoholCorrelation {
    /// Causes whose name matched the pattern.
    pub causes: Vec<String>,
    pub pairs: usize,
    /// `None` when there are too few pairs or no variance.
    pub coefficient: Option<f64>,
}

/// Pearson's r of two equally long samples.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some(sxy / (sxx.sqrt() * syy.sqrt()))
}

/// Correlate alcohol consumption with the rate of causes matching
/// `cause_pattern` (case-insensitive substring).
///
/// Rows without alcohol data are ignored.
pub fn alcohol_correlation(
    records: &[MergedRecord],
    cause_pattern: &str,
    filter: &RecordFilter,
) -> AlcoholCorrelation {
    let pattern = cause_pattern.to_lowercase();
    let mut causes = BTreeSet::new();
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for record in filter
        .apply(records)
        .filter(|r| r.cause.to_lowercase().contains(&pattern))
    {
        causes.insert(record.cause.as_str());
        if let Some(liters) = record.alcohol_consumption_liters {
            xs.push(liters);
            ys.push(record.death_rate_per_100k);
        }
    }
    let coefficient = if xs.len() < MIN_CORRELATION_PAIRS {
        None
    } else {
        pearson(&xs, &ys)
    };
    AlcoholCorrelation {
        causes: causes.into_iter().map(ToString::to_string).collect(),
        pairs: xs.len(),
        coefficient,
    }
}
