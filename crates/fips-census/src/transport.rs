//! HTTP seam between the fetcher and the vendor API.

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

use crate::config::{CensusConfig, redact_key};
use crate::error::{CensusError, Result};

/// Raw vendor response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl TransportResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues one blocking GET per call.
pub trait Transport {
    fn get(&self, url: &str) -> Result<TransportResponse>;
}

/// [`Transport`] backed by a blocking `reqwest` client.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a client honoring the configured timeout, if any.
    pub fn new(config: &CensusConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(CensusError::from)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<TransportResponse> {
        tracing::debug!(url = %redact_key(url), "requesting census table");

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, concat!("fips-census/", env!("CARGO_PKG_VERSION")))
            .send()
            // reqwest errors embed the full URL, key included
            .map_err(|e| CensusError::Network(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| CensusError::Network(e.without_url().to_string()))?;

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(HttpTransport::new(&CensusConfig::default()).is_ok());
    }

    #[test]
    fn test_success_range() {
        assert!(TransportResponse::ok("[]").is_success());
        let not_found = TransportResponse {
            status: 404,
            body: String::new(),
        };
        assert!(!not_found.is_success());
    }
}
