//! Variable series detection.
//!
//! ACS variable codes start with an alphabetic table prefix (`B01003_001E`,
//! `S1901_C01_012E`, `DP05_0001E`). The prefix selects the API sub-path, so
//! every variable in one request must share it.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CensusError, Result};

/// Leading run of ASCII letters.
static SERIES_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)").expect("Invalid series prefix regex"));

/// Series tag inferred from a variable's leading letters (e.g. `B`, `S`, `DP`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Series(String);

impl Series {
    /// Extracts the series of a single variable name.
    pub fn of(variable: &str) -> Result<Self> {
        SERIES_PREFIX
            .captures(variable)
            .and_then(|caps| caps.get(1))
            .map(|prefix| Self(prefix.as_str().to_string()))
            .ok_or_else(|| CensusError::InvalidVariableFormat {
                variable: variable.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns the single series shared by all `variables`.
///
/// Fails on the first variable without a letter prefix, or on the first
/// variable whose series differs from the first one seen.
pub fn classify_series<I, S>(variables: I) -> Result<Series>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut series: Option<Series> = None;

    for variable in variables {
        let variable = variable.as_ref();
        let found = Series::of(variable)?;
        match &series {
            None => series = Some(found),
            Some(expected) if *expected != found => {
                return Err(CensusError::MixedSeries {
                    expected: expected.to_string(),
                    found: found.to_string(),
                    variable: variable.to_string(),
                });
            }
            Some(_) => {}
        }
    }

    let series = series.ok_or(CensusError::NoVariables)?;
    tracing::info!(
        series = %series,
        "all variables belong to one series, API link adjusted accordingly"
    );
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_of_detailed_table() {
        assert_eq!(Series::of("B01003_001E").unwrap().as_str(), "B");
    }

    #[test]
    fn test_series_of_profile_table() {
        assert_eq!(Series::of("DP05_0001E").unwrap().as_str(), "DP");
    }

    #[test]
    fn test_series_of_rejects_leading_digit() {
        let err = Series::of("1ABC").unwrap_err();
        assert!(matches!(err, CensusError::InvalidVariableFormat { variable } if variable == "1ABC"));
    }

    #[test]
    fn test_series_is_case_sensitive() {
        assert_ne!(Series::of("b01").unwrap(), Series::of("B01").unwrap());
    }

    #[test]
    fn test_classify_shared_prefix() {
        let series = classify_series(["S1901_C01_012E", "S1701_C03_001E"]).unwrap();
        assert_eq!(series.as_str(), "S");
    }

    #[test]
    fn test_classify_mixed_series() {
        let err = classify_series(["B01003_001E", "DP05_0001E"]).unwrap_err();
        assert!(matches!(
            err,
            CensusError::MixedSeries { ref expected, ref found, ref variable }
                if expected == "B" && found == "DP" && variable == "DP05_0001E"
        ));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_classify_prefix_must_match_exactly() {
        // "D" and "DP" share a first letter but are different series.
        assert!(classify_series(["DP05_0001E", "D01"]).is_err());
    }

    #[test]
    fn test_classify_empty() {
        let err = classify_series(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, CensusError::NoVariables));
    }

    #[test]
    fn test_classify_format_error_after_valid_variable() {
        let err = classify_series(["B01003_001E", "_B01"]).unwrap_err();
        assert!(matches!(err, CensusError::InvalidVariableFormat { .. }));
    }
}
