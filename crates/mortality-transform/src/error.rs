//! Error types for the harmonization pipeline.

use mortality_geo::GeoError;
use mortality_ingest::IngestError;
use thiserror::Error;

/// Errors that abort a pipeline run.
///
/// Row-level irregularities (unmatched keys, missing values, unknown
/// countries) are not errors; they are absorbed and counted.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Loading or schema checking a source file failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A geographic reference table could not be loaded.
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// A year range has its bounds reversed.
    #[error("invalid {name} year range {start}..={end}")]
    InvalidYearRange {
        name: &'static str,
        start: i32,
        end: i32,
    },

    /// A normalizer thread panicked before handing over its table.
    #[error("{stage} normalizer panicked")]
    WorkerPanicked { stage: &'static str },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, TransformError>;
