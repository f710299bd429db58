//! Table and JSON rendering of command reports.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use mortality_transform::analysis::ChangeBand;
use serde::Serialize;

use crate::commands::{
    CausesReport, CorrelationReport, RankShiftReport, SummaryReport, TrendsReport, YearsReport,
};

/// A command result that renders as tables or as JSON.
pub trait Report: Serialize {
    /// One line printed above the tables.
    fn title(&self) -> String;

    fn tables(&self) -> Vec<Table>;
}

/// Render a report for the terminal.
pub fn render_text<R: Report>(report: &R) -> String {
    let mut out = report.title();
    for table in report.tables() {
        out.push('\n');
        out.push_str(&table.to_string());
    }
    out
}

/// Render a report as pretty-printed JSON.
pub fn render_json<R: Report>(report: &R) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn rate_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.2}"))
}

fn optional_cell(value: Option<f64>, precision: usize) -> Cell {
    match value {
        Some(value) => Cell::new(format!("{value:.precision$}")),
        None => dim_cell("-"),
    }
}

fn band_cell(band: ChangeBand) -> Cell {
    let color = match band {
        ChangeBand::HugeDecrease => Color::Green,
        ChangeBand::ModerateDecrease => Color::Yellow,
        ChangeBand::SlightDecrease => Color::DarkYellow,
        ChangeBand::Increase => Color::Red,
    };
    Cell::new(band.label()).fg(color)
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table.set_header(headers.iter().map(|label| header_cell(label)));
    table
}

fn new_summary_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table.set_header(headers.iter().map(|label| header_cell(label)));
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

impl Report for SummaryReport {
    fn title(&self) -> String {
        match (self.first_year, self.last_year) {
            (Some(first), Some(last)) => format!(
                "{} merged rows, {} countries, {} causes, {first}-{last}",
                self.merged_rows, self.countries, self.causes
            ),
            _ => format!("{} merged rows", self.merged_rows),
        }
    }

    fn tables(&self) -> Vec<Table> {
        let mut tables = Vec::new();

        let mut counts = new_summary_table(&["Table", "Rows"]);
        counts.add_row(vec![Cell::new("Deaths (long form)"), Cell::new(self.death_rows)]);
        counts.add_row(vec![Cell::new("Population"), Cell::new(self.population_rows)]);
        counts.add_row(vec![Cell::new("Alcohol"), Cell::new(self.alcohol_rows)]);
        counts.add_row(vec![
            Cell::new("Merged").fg(Color::Cyan).add_attribute(Attribute::Bold),
            Cell::new(self.merged_rows).add_attribute(Attribute::Bold),
        ]);
        align_column(&mut counts, 1, CellAlignment::Right);
        tables.push(counts);

        let stats = &self.stats;
        let mut merge = new_summary_table(&["Merge", "Rows"]);
        merge.add_row(vec![Cell::new("Death rows in"), Cell::new(stats.rows_in)]);
        merge.add_row(vec![
            Cell::new("No population"),
            count_cell(stats.missing_population, Color::Yellow),
        ]);
        merge.add_row(vec![
            Cell::new("Zero population"),
            count_cell(stats.non_positive_population, Color::Yellow),
        ]);
        merge.add_row(vec![
            Cell::new("No deaths value"),
            count_cell(stats.missing_deaths, Color::Yellow),
        ]);
        merge.add_row(vec![
            Cell::new("Invalid deaths value"),
            count_cell(stats.invalid_deaths, Color::Red),
        ]);
        merge.add_row(vec![Cell::new("With alcohol data"), Cell::new(stats.with_alcohol)]);
        merge.add_row(vec![
            Cell::new("Rows out").fg(Color::Cyan).add_attribute(Attribute::Bold),
            Cell::new(stats.rows_out).add_attribute(Attribute::Bold),
        ]);
        align_column(&mut merge, 1, CellAlignment::Right);
        tables.push(merge);

        let mut continents = new_table(&["Continent", "Countries"]);
        for entry in &self.continents {
            let name = Cell::new(entry.continent.name());
            let name = if entry.continent.is_classified() {
                name
            } else {
                name.fg(Color::DarkGrey)
            };
            continents.add_row(vec![name, Cell::new(entry.countries)]);
        }
        align_column(&mut continents, 1, CellAlignment::Right);
        tables.push(continents);

        let mut years = new_table(&["Year", "Records"]);
        for entry in &self.records_per_year {
            years.add_row(vec![Cell::new(entry.year), Cell::new(entry.records)]);
        }
        align_column(&mut years, 1, CellAlignment::Right);
        tables.push(years);

        let mut top = new_table(&["Country", "Records"]);
        for entry in &self.top_countries {
            top.add_row(vec![Cell::new(&entry.country), Cell::new(entry.records)]);
        }
        align_column(&mut top, 1, CellAlignment::Right);
        tables.push(top);

        tables
    }
}

impl Report for CausesReport {
    fn title(&self) -> String {
        format!("{} causes of death", self.causes.len())
    }

    fn tables(&self) -> Vec<Table> {
        let mut table = new_table(&["#", "Cause"]);
        for (idx, cause) in self.causes.iter().enumerate() {
            table.add_row(vec![dim_cell(idx + 1), Cell::new(cause)]);
        }
        align_column(&mut table, 0, CellAlignment::Right);
        vec![table]
    }
}

impl Report for YearsReport {
    fn title(&self) -> String {
        match (self.years.first(), self.years.last()) {
            (Some(first), Some(last)) => {
                format!("{} years, {first}-{last}", self.years.len())
            }
            _ => "no years".to_string(),
        }
    }

    fn tables(&self) -> Vec<Table> {
        let mut table = new_table(&["Year"]);
        for year in &self.years {
            table.add_row(vec![Cell::new(year)]);
        }
        vec![table]
    }
}

impl Report for TrendsReport {
    fn title(&self) -> String {
        let trend = match self.slope_per_year {
            Some(slope) => format!("overall trend {slope:+.2} per 100k per year"),
            None => "no overall trend".to_string(),
        };
        format!(
            "Change in cause of death rates ({}-{}), {}; {trend}",
            self.from, self.to, self.scope
        )
    }

    fn tables(&self) -> Vec<Table> {
        let from = self.from.to_string();
        let to = self.to.to_string();
        let mut changes = new_table(&["Cause", from.as_str(), to.as_str(), "Change %", "Band"]);
        for change in &self.changes {
            changes.add_row(vec![
                Cell::new(&change.cause),
                rate_cell(change.rate_from),
                rate_cell(change.rate_to),
                Cell::new(format!("{:+.1}", change.change_pct)),
                band_cell(change.band),
            ]);
        }
        for index in 1..=3 {
            align_column(&mut changes, index, CellAlignment::Right);
        }

        let mut overall = new_table(&["Year", "Deaths per 100k"]);
        for point in &self.overall {
            overall.add_row(vec![Cell::new(point.year), rate_cell(point.rate_per_100k)]);
        }
        align_column(&mut overall, 1, CellAlignment::Right);

        vec![changes, overall]
    }
}

impl Report for CorrelationReport {
    fn title(&self) -> String {
        let coefficient = match self.correlation.coefficient {
            Some(r) => format!("Pearson r = {r:.2}"),
            None => "not enough data".to_string(),
        };
        format!(
            "Alcohol consumption vs deaths matching '{}', {}: {coefficient}",
            self.pattern, self.scope
        )
    }

    fn tables(&self) -> Vec<Table> {
        let mut table = new_summary_table(&["Causes", "Pairs", "Pearson r"]);
        table.add_row(vec![
            Cell::new(self.correlation.causes.join("\n")),
            Cell::new(self.correlation.pairs),
            optional_cell(self.correlation.coefficient, 3),
        ]);
        align_column(&mut table, 1, CellAlignment::Right);
        align_column(&mut table, 2, CellAlignment::Right);
        vec![table]
    }
}

impl Report for RankShiftReport {
    fn title(&self) -> String {
        format!(
            "Change in top {} causes of death rank ({}-{}), {}",
            self.top, self.from, self.to, self.scope
        )
    }

    fn tables(&self) -> Vec<Table> {
        let from = format!("Rank {}", self.from);
        let to = format!("Rank {}", self.to);
        let mut table = new_table(&["Cause", from.as_str(), to.as_str(), "Shift"]);
        for shift in &self.shifts {
            let gained = shift.places_gained();
            let delta = match gained {
                0 => dim_cell("="),
                g if g > 0 => Cell::new(format!("+{g}")).fg(Color::Red),
                g => Cell::new(g).fg(Color::Green),
            };
            table.add_row(vec![
                Cell::new(&shift.cause),
                Cell::new(shift.rank_from),
                Cell::new(shift.rank_to),
                delta,
            ]);
        }
        for index in 1..=3 {
            align_column(&mut table, index, CellAlignment::Right);
        }
        vec![table]
    }
}
