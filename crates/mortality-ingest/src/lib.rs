//! Source data ingestion for the mortality pipeline.
//!
//! This crate loads the three fixed-shape input files (deaths by cause,
//! population by age, alcohol consumption) into Polars DataFrames.
//!
//! # Features
//!
//! - **Schema checks**: required columns are verified from the header row
//!   before a file is read in full; a missing column is fatal
//! - **Text loading**: every column is read as text, so malformed cells never
//!   abort a load
//! - **Coercion**: [`f64_values`] and [`i64_values`] turn non-numeric cells
//!   into `None`, never into zero
//!
//! # Example
//!
//! ```ignore
//! use mortality_ingest::{SourceFiles, load_sources};
//!
//! let files = SourceFiles::in_dir(std::path::Path::new("data"));
//! let raw = load_sources(&files)?;
//! println!("{} death rows", raw.deaths.height());
//! ```

mod csv;
mod error;
mod schema;
mod sources;
mod values;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    CsvHeaders, MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit,
    read_csv_schema, read_csv_table, validate_dataframe_shape, validate_encoding,
};

// === Schema ===
pub use schema::SourceKind;

// === Source Files ===
pub use sources::{
    DATA_DIR_ENV_VAR, DEFAULT_ALCOHOL_FILE, DEFAULT_DEATHS_FILE, DEFAULT_POPULATION_FILE,
    RawSources, SourceFiles, check_schemas, data_root, ensure_dir, load_source, load_sources,
};

// === Value Coercion ===
pub use values::{f64_values, i64_values, parse_f64, parse_i64, string_values};
