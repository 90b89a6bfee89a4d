//! Core types shared by the county reconciliation crates.
//!
//! - [`FipsCode`]: the canonical 5-character county identifier
//! - [`ColumnMapping`]: insertion-ordered source → target column mapping
//! - [`columns`]: column names and table-level constants used across crates

pub mod columns;
pub mod error;
pub mod ids;
pub mod mapping;

pub use columns::{
    COUNTY_HEADER, COUNTY_NAME, COUNTY_VARIABLE, EXCLUDED_STATE, EXPECTED_COUNTY_COUNT, FIPS_CODE,
    NAME_HEADER, NAME_VARIABLE, STATE_HEADER, STATE_NAME, STATE_VARIABLE, title_case_header,
};
pub use error::{ModelError, Result};
pub use ids::{COUNTY_CODE_WIDTH, FIPS_CODE_LENGTH, FipsCode, STATE_CODE_WIDTH, zero_pad};
pub use mapping::{ColumnMapping, MappingEntry};
