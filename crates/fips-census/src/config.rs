//! Configuration for the census fetcher.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CensusError, Result};
use crate::series::Series;

/// Census API host.
pub const DEFAULT_BASE_URL: &str = "https://api.census.gov";

/// Folder the fetched tables are written to.
pub const DEFAULT_DATA_FOLDER: &str = "data_uscensus";

/// Text file holding the Census API key.
pub const DEFAULT_API_KEY_FILE: &str = "apikey_uscensus.txt";

/// ACS 5-year vintage requested when none is given.
pub const DEFAULT_YEAR: &str = "2023";

/// Placeholder written in place of the API key in logged URLs.
pub const REDACTED_KEY: &str = "[REDACTED]";

/// Explicit fetcher configuration, replacing module-wide constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CensusConfig {
    /// Scheme and host of the vendor API, without trailing slash.
    pub base_url: String,
    /// Destination directory for fetched tables.
    pub data_folder: PathBuf,
    /// File containing the API key.
    pub api_key_file: PathBuf,
    /// Default vintage.
    pub year: String,
    /// Series tag → URL sub-path appended to `acs/acs5`.
    pub series: BTreeMap<String, String>,
    /// Optional request timeout. `None` blocks until the server answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for CensusConfig {
    fn default() -> Self {
        let series = [("B", ""), ("S", "/subject"), ("DP", "/profile")]
            .into_iter()
            .map(|(tag, path)| (tag.to_string(), path.to_string()))
            .collect();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_folder: PathBuf::from(DEFAULT_DATA_FOLDER),
            api_key_file: PathBuf::from(DEFAULT_API_KEY_FILE),
            year: DEFAULT_YEAR.to_string(),
            series,
            request_timeout_secs: None,
        }
    }
}

impl CensusConfig {
    /// Sets the destination directory.
    #[must_use]
    pub fn with_data_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.data_folder = folder.into();
        self
    }

    /// Sets the API host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// URL sub-path for a series.
    pub fn series_path(&self, series: &Series) -> Result<&str> {
        self.series
            .get(series.as_str())
            .map(String::as_str)
            .ok_or_else(|| CensusError::UnknownSeries {
                series: series.to_string(),
            })
    }

    /// Builds the county-level query URL.
    ///
    /// `{base}/data/{year}/acs/acs5{sub-path}?get={vars}&for=county:*&key={key}`
    pub fn query_url(&self, year: &str, series_path: &str, variables: &[String], key: &str) -> String {
        format!(
            "{}/data/{}/acs/acs5{}?get={}&for=county:*&key={}",
            self.base_url.trim_end_matches('/'),
            year,
            series_path,
            variables.join(","),
            key
        )
    }

    /// Destination path for a fetched table.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.data_folder.join(file_name)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Replaces the `key=` query value with [`REDACTED_KEY`].
pub fn redact_key(url: &str) -> String {
    match url.find("&key=") {
        Some(idx) => format!("{}&key={}", &url[..idx], REDACTED_KEY),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_series_table() {
        let config = CensusConfig::default();
        assert_eq!(config.series_path(&Series::of("B01").unwrap()).unwrap(), "");
        assert_eq!(
            config.series_path(&Series::of("S1901").unwrap()).unwrap(),
            "/subject"
        );
        assert_eq!(
            config.series_path(&Series::of("DP05").unwrap()).unwrap(),
            "/profile"
        );
    }

    #[test]
    fn test_unknown_series() {
        let config = CensusConfig::default();
        let err = config.series_path(&Series::of("C17002").unwrap()).unwrap_err();
        assert!(matches!(err, CensusError::UnknownSeries { series } if series == "C"));
    }

    #[test]
    fn test_query_url_shape() {
        let config = CensusConfig::default();
        let variables = vec!["NAME".to_string(), "S1901_C01_012E".to_string()];
        let url = config.query_url("2023", "/subject", &variables, "abc123");
        assert_eq!(
            url,
            "https://api.census.gov/data/2023/acs/acs5/subject?get=NAME,S1901_C01_012E&for=county:*&key=abc123"
        );
    }

    #[test]
    fn test_redact_key() {
        let url = "https://api.census.gov/data/2023/acs/acs5?get=NAME&for=county:*&key=secret";
        assert_eq!(
            redact_key(url),
            "https://api.census.gov/data/2023/acs/acs5?get=NAME&for=county:*&key=[REDACTED]"
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CensusConfig = toml::from_str(
            r#"
            year = "2022"
            data_folder = "out"

            [series]
            B = ""
            C = "/cprofile"
            "#,
        )
        .unwrap();

        assert_eq!(config.year, "2022");
        assert_eq!(config.data_folder, PathBuf::from("out"));
        assert_eq!(config.api_key_file, PathBuf::from(DEFAULT_API_KEY_FILE));
        assert_eq!(config.series.len(), 2);
        assert_eq!(config.output_path("t.csv"), PathBuf::from("out").join("t.csv"));
    }
}
