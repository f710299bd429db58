//! Source and canonical column names.
//!
//! Source names are the headers of the three input files. Canonical names are
//! the headers used when the harmonized tables are exported as DataFrames.

// =============================================================================
// Deaths source
// =============================================================================

/// Country column of the death-by-cause table.
pub const DEATHS_COUNTRY: &str = "Country/Territory";
/// Year column of the death-by-cause table.
pub const DEATHS_YEAR: &str = "Year";
/// ISO-3 code column of the death-by-cause table (not a cause).
pub const DEATHS_CODE: &str = "Code";

// =============================================================================
// Population source
// =============================================================================

pub const POP_LOCATION: &str = "Location";
pub const POP_TIME: &str = "Time";
pub const POP_VARIANT: &str = "Variant";
pub const POP_LOC_TYPE: &str = "LocTypeID";
pub const POP_AGE_GROUP: &str = "AgeGrp";
pub const POP_MALE: &str = "PopMale";
pub const POP_FEMALE: &str = "PopFemale";
pub const POP_TOTAL: &str = "PopTotal";

// =============================================================================
// Alcohol source
// =============================================================================

pub const ALCOHOL_ENTITY: &str = "Entity";
pub const ALCOHOL_YEAR: &str = "Year";
/// Per-capita consumption column, as published.
pub const ALCOHOL_LITERS: &str = "Total alcohol consumption per capita (liters of pure alcohol, projected estimates, 15+ years of age)";

// =============================================================================
// Canonical (harmonized) names
// =============================================================================

pub const COUNTRY: &str = "country";
pub const YEAR: &str = "Year";
pub const CAUSE: &str = "Cause";
pub const DEATHS: &str = "Deaths";
pub const AGE_GROUP: &str = "Age_Group";
pub const POPULATION_MALE: &str = "Population_Male";
pub const POPULATION_FEMALE: &str = "Population_Female";
pub const POPULATION_TOTAL: &str = "Population_Total";
pub const DEATH_RATE: &str = "Death_Rate_per_100k";
pub const ALCOHOL_CONSUMPTION: &str = "Alcohol_Consumption_Liters";
pub const CONTINENT: &str = "Continent";

/// Columns every death file must carry besides its cause columns.
pub const DEATHS_REQUIRED: [&str; 2] = [DEATHS_COUNTRY, DEATHS_YEAR];

/// Columns of the death file that are keys rather than causes.
pub const DEATHS_KEY_COLUMNS: [&str; 3] = [DEATHS_COUNTRY, DEATHS_YEAR, DEATHS_CODE];

/// Columns every population file must carry.
pub const POPULATION_REQUIRED: [&str; 8] = [
    POP_LOCATION,
    POP_TIME,
    POP_VARIANT,
    POP_LOC_TYPE,
    POP_AGE_GROUP,
    POP_MALE,
    POP_FEMALE,
    POP_TOTAL,
];

/// Columns every alcohol file must carry.
pub const ALCOHOL_REQUIRED: [&str; 3] = [ALCOHOL_ENTITY, ALCOHOL_YEAR, ALCOHOL_LITERS];
