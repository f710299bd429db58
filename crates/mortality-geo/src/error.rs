//! Error types for loading geographic reference tables.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading taxonomy, override or alias tables.
///
/// Resolving a country never fails; these errors only surface when a table
/// itself is malformed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeoError {
    /// Failed to parse a CSV table.
    #[error("failed to parse {file}: {message}")]
    CsvParse { file: String, message: String },

    /// Failed to read an external table from disk.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A continent value is not one of the known continents.
    #[error("invalid continent '{value}' for '{key}' in {file}")]
    InvalidContinent {
        key: String,
        value: String,
        file: String,
    },
}

/// Result type for geographic table operations.
pub type Result<T> = std::result::Result<T, GeoError>;
