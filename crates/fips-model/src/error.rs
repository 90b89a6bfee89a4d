use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("FIPS code '{value}' has length {length} after padding, expected 5")]
    InvalidFipsLength { value: String, length: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
