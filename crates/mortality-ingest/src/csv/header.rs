//! Header row of a source file.

use ::csv::StringRecord;

/// Column names read from the header row of a source file, trimmed and in
/// file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    pub columns: Vec<String>,
}

impl CsvHeaders {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    /// Zero-based index of `column`.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// First column from `required` that is absent, if any.
    pub fn first_missing<'a>(&self, required: &[&'a str]) -> Option<&'a str> {
        required.iter().copied().find(|name| !self.contains(name))
    }

    /// Columns that appear more than once, each reported once.
    pub fn duplicates(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        let mut repeated = Vec::new();
        for column in &self.columns {
            if seen.contains(&column.as_str()) {
                if !repeated.contains(&column.as_str()) {
                    repeated.push(column.as_str());
                }
            } else {
                seen.push(column.as_str());
            }
        }
        repeated
    }
}

impl From<&StringRecord> for CsvHeaders {
    fn from(record: &StringRecord) -> Self {
        Self::new(
            record
                .iter()
                .map(|name| name.trim_start_matches('\u{feff}').trim().to_string())
                .collect(),
        )
    }
}
