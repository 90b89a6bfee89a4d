//! Fetcher tests against an in-memory transport.

use std::cell::RefCell;
use std::fs;

use fips_census::{
    CensusConfig, CensusError, CensusFetcher, Credential, ShapeOptions, Transport,
    TransportResponse,
};
use fips_model::{ColumnMapping, FIPS_CODE};
use tempfile::{TempDir, tempdir};

/// Records requested URLs and answers with a canned response.
struct FakeTransport {
    response: TransportResponse,
    requests: RefCell<Vec<String>>,
}

impl FakeTransport {
    fn new(response: TransportResponse) -> Self {
        Self {
            response,
            requests: RefCell::new(Vec::new()),
        }
    }

    fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str) -> fips_census::Result<TransportResponse> {
        self.requests.borrow_mut().push(url.to_string());
        Ok(self.response.clone())
    }
}

/// Fails every request as a dropped connection would.
struct UnreachableTransport;

impl Transport for UnreachableTransport {
    fn get(&self, _url: &str) -> fips_census::Result<TransportResponse> {
        Err(CensusError::Network("connection reset".to_string()))
    }
}

fn fetcher(dir: &TempDir, response: TransportResponse) -> CensusFetcher<FakeTransport> {
    let config = CensusConfig::default().with_data_folder(dir.path().join("data_uscensus"));
    CensusFetcher::new(
        config,
        Credential::Inline("test-key".to_string()),
        FakeTransport::new(response),
    )
}

fn population_mapping() -> ColumnMapping {
    ColumnMapping::new().with("B01001_001E", "Total Population")
}

#[test]
fn fetch_reorders_columns_regardless_of_response_order() {
    let dir = tempdir().unwrap();
    let body = r#"[["NAME","B01001_001E","state","county"],["Autauga County, Alabama","58761","01","001"]]"#;
    let fetcher = fetcher(&dir, TransportResponse::ok(body));

    let output = fetcher
        .fetch(&population_mapping(), "2023", "population.csv")
        .unwrap();

    assert_eq!(output.imported_variables, vec!["Total Population"]);
    assert_eq!(output.rows, 1);
    let content = fs::read_to_string(&output.path).unwrap();
    assert_eq!(
        content,
        "State,County,Name,Total Population\n01,001,\"Autauga County, Alabama\",58761\n"
    );
}

#[test]
fn fetch_builds_query_url() {
    let dir = tempdir().unwrap();
    let body = r#"[["NAME","S1901_C01_012E","state","county"]]"#;
    let fetcher = fetcher(&dir, TransportResponse::ok(body));
    let mapping = ColumnMapping::new().with("S1901_C01_012E", "Median Household Income");

    fetcher.fetch(&mapping, "2022", "income.csv").unwrap();

    let requests = fetcher.transport().requests.borrow();
    assert_eq!(
        requests.as_slice(),
        ["https://api.census.gov/data/2022/acs/acs5/subject?get=NAME,S1901_C01_012E&for=county:*&key=test-key"]
    );
}

#[test]
fn fetch_rejects_mixed_series_before_request() {
    let dir = tempdir().unwrap();
    let fetcher = fetcher(&dir, TransportResponse::ok("[]"));
    let mapping = ColumnMapping::new()
        .with("B01001_001E", "Total Population")
        .with("DP05_0018E", "Median Age");

    let err = fetcher.fetch(&mapping, "2023", "mixed.csv").unwrap_err();

    assert!(matches!(err, CensusError::MixedSeries { .. }));
    assert_eq!(fetcher.transport().request_count(), 0);
    assert!(!dir.path().join("data_uscensus").exists());
}

#[test]
fn fetch_rejects_unknown_series_before_request() {
    let dir = tempdir().unwrap();
    let fetcher = fetcher(&dir, TransportResponse::ok("[]"));
    let mapping = ColumnMapping::new().with("C17002_001E", "Poverty Ratio");

    let err = fetcher.fetch(&mapping, "2023", "poverty.csv").unwrap_err();

    assert!(matches!(err, CensusError::UnknownSeries { series } if series == "C"));
    assert_eq!(fetcher.transport().request_count(), 0);
}

#[test]
fn fetch_failed_status_leaves_no_file() {
    let dir = tempdir().unwrap();
    let fetcher = fetcher(
        &dir,
        TransportResponse {
            status: 400,
            body: "error: unknown variable".to_string(),
        },
    );
    let target = dir.path().join("data_uscensus").join("population.csv");
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(&target, "stale\n").unwrap();

    let err = fetcher
        .fetch(&population_mapping(), "2023", "population.csv")
        .unwrap_err();

    assert!(matches!(err, CensusError::RequestFailed { status: 400 }));
    assert!(!target.exists());
}

#[test]
fn fetch_network_failure_leaves_no_file() {
    let dir = tempdir().unwrap();
    let config = CensusConfig::default().with_data_folder(dir.path().join("data_uscensus"));
    let fetcher = CensusFetcher::new(
        config,
        Credential::Inline("test-key".to_string()),
        UnreachableTransport,
    );
    let target = dir.path().join("data_uscensus").join("population.csv");
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(&target, "stale\n").unwrap();

    let err = fetcher
        .fetch(&population_mapping(), "2023", "population.csv")
        .unwrap_err();

    assert!(matches!(err, CensusError::Network(ref message) if message == "connection reset"));
    assert!(!err.is_configuration());
    assert!(!target.exists());
}

#[test]
fn fetch_replaces_existing_file() {
    let dir = tempdir().unwrap();
    let body = r#"[["state","county","NAME","B01001_001E"],["06","037","Los Angeles County, California","9848406"]]"#;
    let fetcher = fetcher(&dir, TransportResponse::ok(body));
    let target = dir.path().join("data_uscensus").join("population.csv");
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(&target, "old,header\nx,y\n").unwrap();

    fetcher
        .fetch(&population_mapping(), "2023", "population.csv")
        .unwrap();

    let content = fs::read_to_string(&target).unwrap();
    assert!(content.starts_with("State,County,Name,Total Population\n"));
    assert!(!content.contains("old,header"));
}

#[test]
fn fetch_missing_response_column() {
    let dir = tempdir().unwrap();
    let body = r#"[["NAME","state","county"],["Autauga County, Alabama","01","001"]]"#;
    let fetcher = fetcher(&dir, TransportResponse::ok(body));

    let err = fetcher
        .fetch(&population_mapping(), "2023", "population.csv")
        .unwrap_err();

    assert!(matches!(err, CensusError::MissingResponseColumn { column } if column == "B01001_001E"));
}

#[test]
fn fetch_shaped_produces_canonical_table() {
    let dir = tempdir().unwrap();
    let mut rows = vec![r#"["NAME","B01001_001E","state","county"]"#.to_string()];
    for i in 0..5 {
        rows.push(format!(r#"["County {i}, Alabama","{}","01","{:03}"]"#, 1000 + i, i + 1));
    }
    rows.push(r#"["Bayamón Municipio, Puerto Rico","185187","72","021"]"#.to_string());
    let body = format!("[{}]", rows.join(","));
    let fetcher = fetcher(&dir, TransportResponse::ok(body));
    let options = ShapeOptions {
        expected_rows: 5,
        ..ShapeOptions::default()
    };

    let (output, summary) = fetcher
        .fetch_shaped(&population_mapping(), "2023", "population.csv", &options)
        .unwrap();

    assert_eq!(output.rows, 6);
    assert_eq!(summary.rows, 5);
    assert_eq!(summary.removed_rows, 1);
    let content = fs::read_to_string(&output.path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some(format!("{FIPS_CODE},County Name,State Name,Total Population").as_str())
    );
    assert_eq!(lines.next(), Some("01001,County 0,Alabama,1000"));
    assert!(!content.contains("Puerto Rico"));
}
