//! Census ACS county tables.
//!
//! This crate pulls county-level variables from the Census Bureau ACS 5-year
//! API and shapes them into the canonical county layout.
//!
//! # Overview
//!
//! - [`classify_series`]: infers the table series (`B`, `S`, `DP`, ...) shared
//!   by a batch of variables and rejects mixed batches before any request
//! - [`CensusFetcher`]: one query per series, columns reordered and renamed
//!   through a [`fips_model::ColumnMapping`], written with replace semantics
//! - [`shape_county_table`]: derives `fips_code`, splits the name field,
//!   drops Puerto Rico, enforces the 3,144-county count, rewrites in place
//!
//! Configuration is explicit ([`CensusConfig`]) and the network sits behind
//! the [`Transport`] trait, so the whole pipeline runs in tests without
//! touching the network.
//!
//! # Example
//!
//! ```no_run
//! use fips_census::{CensusConfig, CensusFetcher, shape_county_table};
//! use fips_model::ColumnMapping;
//!
//! fn fetch_population() -> fips_census::Result<()> {
//!     let fetcher = CensusFetcher::http(CensusConfig::default())?;
//!     let mapping = ColumnMapping::new().with("B01003_001E", "Total Population");
//!
//!     let output = fetcher.fetch(&mapping, "2023", "population.csv")?;
//!     shape_county_table(&output.path, &output.imported_variables)?;
//!     Ok(())
//! }
//! ```

mod config;
mod credential;
mod error;
mod fetch;
mod series;
mod shape;
mod transport;

pub use config::{
    CensusConfig, DEFAULT_API_KEY_FILE, DEFAULT_BASE_URL, DEFAULT_DATA_FOLDER, DEFAULT_YEAR,
    REDACTED_KEY, redact_key,
};
pub use credential::Credential;
pub use error::{CensusError, Result};
pub use fetch::{
    CensusFetcher, FetchOutput, descriptive_headers, imported_variables, output_columns,
    parse_response, reorder_rows, request_variables,
};
pub use series::{Series, classify_series};
pub use shape::{
    NAME_SEPARATOR, ShapeOptions, ShapeSummary, shape_county_table, shape_county_table_with,
    shape_frame,
};
pub use transport::{HttpTransport, Transport, TransportResponse};
