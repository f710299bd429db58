//! CSV file reading into string-typed DataFrames.
//!
//! Every column is loaded as text so that a stray non-numeric cell never
//! aborts the read; numeric coercion happens later, cell by cell.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use ::csv::{ReaderBuilder, Trim};
use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};

use super::header::CsvHeaders;

/// Largest file accepted for in-memory loading.
///
/// The population file with single-year age groups runs to several hundred
/// MB, so the limit is generous.
pub const MAX_CSV_FILE_SIZE: u64 = 2 * 1024 * 1024 * 1024;

/// Column count above which a table is reported as unusually wide.
const WIDE_TABLE_COLUMNS: usize = 500;

const UTF16_MARKS: [([u8; 2], &str); 2] = [
    ([0xFF, 0xFE], "UTF-16 LE"),
    ([0xFE, 0xFF], "UTF-16 BE"),
];

fn io_error(path: &Path, source: io::Error) -> IngestError {
    match source.kind() {
        io::ErrorKind::NotFound => IngestError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        },
    }
}

fn parse_error(path: &Path, message: impl ToString) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Check the file size against [`MAX_CSV_FILE_SIZE`].
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let size = std::fs::metadata(path)
        .map_err(|e| io_error(path, e))?
        .len();
    if size > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size,
        });
    }
    Ok(())
}

/// Reject files that start with a UTF-16 byte order mark.
///
/// The sources are published as UTF-8; a UTF-16 export would otherwise load
/// as a single garbled column.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut mark = [0u8; 2];
    let read = file.read(&mut mark).map_err(|e| io_error(path, e))?;
    if read < mark.len() {
        return Ok(());
    }
    match UTF16_MARKS.iter().find(|(bytes, _)| *bytes == mark) {
        Some((_, encoding)) => Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: *encoding,
        }),
        None => Ok(()),
    }
}

/// Check a loaded table: blank column names fail, an empty or very wide
/// table only warns.
pub fn validate_dataframe_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df
        .get_column_names()
        .iter()
        .any(|name| name.trim().is_empty())
    {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }
    if df.height() == 0 {
        tracing::warn!(path = %path.display(), "source file has a header but no rows");
    }
    if df.width() > WIDE_TABLE_COLUMNS {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "source file is unusually wide"
        );
    }
    Ok(())
}

/// Read only the header row.
///
/// A UTF-8 byte order mark is dropped and names are trimmed.
pub fn read_csv_schema(path: &Path) -> Result<CsvHeaders> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(file);
    let record = reader.headers().map_err(|e| match e.into_kind() {
        ::csv::ErrorKind::Io(source) => io_error(path, source),
        other => parse_error(path, format!("{other:?}")),
    })?;
    if record.iter().all(|name| name.trim().is_empty()) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(CsvHeaders::from(record))
}

/// Load a whole file with every column as text.
///
/// Column names are trimmed and stripped of a byte order mark so that they
/// match [`read_csv_schema`].
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    check_file_size(path)?;
    validate_encoding(path)?;

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(SerReader::finish)
        .map_err(|e| parse_error(path, e))?;

    let cleaned: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    if df
        .get_column_names()
        .iter()
        .zip(&cleaned)
        .any(|(name, clean)| name.as_str() != clean)
    {
        df.set_column_names(cleaned.iter().map(String::as_str))?;
    }

    validate_dataframe_shape(&df, path)?;
    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read source table"
    );
    Ok(df)
}
