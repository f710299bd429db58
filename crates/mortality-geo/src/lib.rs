//! Geographic reference data for the mortality pipeline.
//!
//! This crate provides:
//!
//! - **Continent resolution** through an ISO-based taxonomy, a manual override
//!   table and an `Other` fallback ([`ContinentResolver`])
//! - **Country-name reconciliation** between datasets that spell the same
//!   country differently ([`CountryAliases`])
//!
//! All reference tables are CSV files under `data/`, embedded at compile time.
//!
//! # Example
//!
//! ```rust,ignore
//! use mortality_geo::ContinentResolver;
//!
//! let resolver = ContinentResolver::embedded()?;
//! assert_eq!(resolver.resolve("Germany").name(), "Europe");
//! assert_eq!(resolver.resolve("Atlantis").name(), "Other");
//! ```

pub mod aliases;
pub mod embedded;
pub mod error;
pub mod overrides;
pub mod resolver;
pub mod taxonomy;

pub use aliases::CountryAliases;
pub use error::{GeoError, Result};
pub use overrides::ContinentOverrides;
pub use resolver::{ContinentResolver, Resolution};
pub use taxonomy::{CountryTaxonomy, LookupFailure};
