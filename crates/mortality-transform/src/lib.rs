//! Harmonization of death, population and alcohol tables.
//!
//! The pipeline turns three raw tables into one long-form table keyed by
//! (country, year, cause) with a deaths-per-100k rate:
//!
//! 1. [`population::normalize`] keeps one projection variant, countries only
//!    and a year window, and converts thousands to heads
//! 2. [`deaths::reshape`] unpivots the wide death table, one row per cause
//! 3. [`alcohol::normalize`] filters years and averages duplicates
//! 4. [`merge::merge`] joins the three, drops rows without a valid
//!    denominator or deaths value and attaches continents
//!
//! [`Pipeline`] wires the steps together; [`analysis`] aggregates the result.
//!
//! # Example
//!
//! ```ignore
//! use mortality_ingest::SourceFiles;
//! use mortality_transform::{Pipeline, PipelineOptions};
//!
//! let pipeline = Pipeline::new(PipelineOptions::default())?;
//! let data = pipeline.run_files(&SourceFiles::from_env())?;
//! println!("{} rows, {} causes", data.merged.len(), data.causes.len());
//! ```

pub mod alcohol;
pub mod analysis;
pub mod deaths;
pub mod error;
pub mod frame;
pub mod merge;
pub mod options;
pub mod pipeline;
pub mod population;
pub mod reconcile;

pub use deaths::ReshapedDeaths;
pub use error::{Result, TransformError};
pub use merge::{MergeOutput, MergeStats};
pub use options::{PipelineOptions, YearRange};
pub use pipeline::{HarmonizedData, Pipeline, distinct_years, run};
