//! Reconciliation diagnostics.

use tracing::{info, warn};

/// What a reconciliation found, alongside a successful join.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Rows in the canonical table.
    pub canonical_rows: usize,
    /// Canonical identifiers absent from the secondary table, in canonical order.
    pub missing_fips: Vec<String>,
    /// Missing values (nulls, and NaN in float columns) per column of the
    /// joined table, in column order.
    pub null_counts: Vec<(String, usize)>,
}

impl ReconcileReport {
    pub fn missing_count(&self) -> usize {
        self.missing_fips.len()
    }

    pub fn has_missing(&self) -> bool {
        !self.missing_fips.is_empty()
    }

    /// Null count of a joined column, `None` if the column is absent.
    pub fn null_count(&self, column: &str) -> Option<usize> {
        self.null_counts
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, count)| *count)
    }

    /// Emits the diagnostics for `source`.
    pub fn log(&self, source: &str) {
        if self.has_missing() {
            warn!(
                source,
                missing = self.missing_count(),
                fips = ?self.missing_fips,
                "counties are missing from the secondary table"
            );
        }
        for (column, nulls) in &self.null_counts {
            info!(source, column = %column, nulls, "null values in joined column");
        }
    }
}
