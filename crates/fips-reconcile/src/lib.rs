//! FIPS normalization and cross-source reconciliation.
//!
//! Secondary county tables arrive with identifiers in any shape (integers,
//! partially padded text, a column named `FIPS` or `GEOID`).
//! [`normalize_fips`] brings them to the canonical `fips_code` column and
//! [`reconcile`] left-joins them onto the canonical county table, reporting
//! every county the secondary source did not cover.
//!
//! ```no_run
//! use fips_model::ColumnMapping;
//! use fips_reconcile::{normalize_fips, reconcile};
//! # fn run(counties: polars::prelude::DataFrame, raw: polars::prelude::DataFrame) -> fips_reconcile::Result<()> {
//! let secondary = normalize_fips(&raw, "FIPS")?;
//! let mapping = ColumnMapping::new().with("rate", "Unemployment Rate");
//! let reconciled = reconcile(&secondary, &mapping, &counties)?;
//! reconciled.report.log("bls");
//! # Ok(())
//! # }
//! ```

mod error;
mod normalize;
mod reconcile;
mod report;

pub use error::{ReconcileError, Result};
pub use normalize::normalize_fips;
pub use reconcile::{Reconciled, ReconciledAll, SourceSpec, reconcile, reconcile_all};
pub use report::ReconcileReport;
