//! `fips.toml` loading.
//!
//! ```toml
//! [census]
//! year = "2023"
//! data_folder = "data_uscensus"
//!
//! [[tables]]
//! name = "population"
//! columns = [
//!     { source = "B01003_001E", target = "Total Population" },
//! ]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use fips_census::CensusConfig;
use fips_model::ColumnMapping;
use serde::{Deserialize, Serialize};

/// Default configuration file name.
pub const CONFIG_FILENAME: &str = "fips.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub census: CensusConfig,
    pub tables: Vec<TableSpec>,
}

/// One census table: a single series of variables written to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,
    /// Overrides `census.year`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Variable code → descriptive column name, in request order.
    pub columns: ColumnMapping,
}

impl TableSpec {
    /// Output file name inside the data folder.
    pub fn file_name(&self) -> String {
        if self.name.ends_with(".csv") {
            self.name.clone()
        } else {
            format!("{}.csv", self.name)
        }
    }
}

impl FileConfig {
    /// All tables, or only the one called `name`.
    pub fn select(&self, name: Option<&str>) -> Result<Vec<&TableSpec>> {
        let Some(name) = name else {
            return Ok(self.tables.iter().collect());
        };
        match self.tables.iter().find(|table| table.name == name) {
            Some(table) => Ok(vec![table]),
            None => bail!("no table named '{name}' in configuration"),
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read configuration {}", path.display()))?;
    let config: FileConfig = toml::from_str(&content)
        .with_context(|| format!("parse configuration {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        tables = config.tables.len(),
        "loaded configuration"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [census]
        year = "2022"

        [[tables]]
        name = "population"
        columns = [
            { source = "B01003_001E", target = "Total Population" },
            { source = "B19013_001E", target = "Median Household Income" },
        ]

        [[tables]]
        name = "age.csv"
        year = "2021"
        columns = [{ source = "DP05_0018E", target = "Median Age" }]
    "#;

    #[test]
    fn test_parse_tables_in_order() {
        let config: FileConfig = toml::from_str(SAMPLE).unwrap();

        assert_eq!(config.census.year, "2022");
        assert_eq!(config.tables.len(), 2);
        let keys: Vec<&str> = config.tables[0].columns.keys().collect();
        assert_eq!(keys, vec!["B01003_001E", "B19013_001E"]);
        assert_eq!(config.tables[1].year.as_deref(), Some("2021"));
    }

    #[test]
    fn test_file_name() {
        let config: FileConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.tables[0].file_name(), "population.csv");
        assert_eq!(config.tables[1].file_name(), "age.csv");
    }

    #[test]
    fn test_select() {
        let config: FileConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.select(None).unwrap().len(), 2);
        assert_eq!(config.select(Some("age.csv")).unwrap()[0].name, "age.csv");
        assert!(config.select(Some("income")).is_err());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
    }
}
