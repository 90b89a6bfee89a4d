//! API key source.

use std::fs;
use std::path::PathBuf;

use crate::error::{CensusError, Result};

/// Where the Census API key comes from.
#[derive(Clone)]
pub enum Credential {
    /// Key supplied directly (tests, environment variables).
    Inline(String),
    /// Text file holding the key, read on every fetch.
    File(PathBuf),
}

impl Credential {
    /// Returns the key with surrounding whitespace removed.
    pub fn resolve(&self) -> Result<String> {
        match self {
            Self::Inline(key) => Ok(key.trim().to_string()),
            Self::File(path) => fs::read_to_string(path)
                .map(|content| content.trim().to_string())
                .map_err(|source| CensusError::CredentialMissing {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inline(_) => f.write_str("Credential::Inline([REDACTED])"),
            Self::File(path) => f.debug_tuple("Credential::File").field(path).finish(),
        }
    }
}
