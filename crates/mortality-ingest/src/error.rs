//! Error types for source file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the three source files.
///
/// All of these are fatal: the pipeline never builds a partial table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Data directory not found.
    #[error("data directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the maximum size accepted for in-memory loading.
    #[error("file {path} is {size} bytes, exceeding the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty (no header row).
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// A header cell is blank.
    #[error("CSV file has an empty column name: {path}")]
    EmptyColumnName { path: PathBuf },

    // === Schema Errors ===
    /// Required column not found in a source file.
    #[error("required column '{column}' not found in {source_name} file {path}")]
    MissingColumn {
        column: String,
        source_name: &'static str,
        path: PathBuf,
    },

    /// The same column name appears twice in a header row.
    #[error("column '{column}' appears more than once in {source_name} file {path}")]
    DuplicateColumn {
        column: String,
        source_name: &'static str,
        path: PathBuf,
    },

    // === DataFrame Errors ===
    /// Column not found in DataFrame.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// Whether this error reports a schema problem in a header row.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::MissingColumn { .. } | Self::DuplicateColumn { .. }
        )
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
