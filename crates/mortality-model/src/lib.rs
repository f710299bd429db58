//! Shared types for the mortality harmonization pipeline.
//!
//! - [`records`]: normalized per-source records and the merged analytical record
//! - [`continent`]: six-continent taxonomy plus the `Other` bucket
//! - [`columns`]: source and canonical column names

pub mod columns;
pub mod continent;
pub mod records;

pub use continent::{Continent, UnknownContinent};
pub use records::{
    AlcoholRecord, CountryYear, DeathRecord, MergedRecord, PopulationRecord, RATE_SCALE,
    death_rate_per_100k,
};
