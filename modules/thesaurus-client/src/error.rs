use erfgoed_common::ErfgoedError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ThesaurusError>;

#[derive(Debug, Error)]
pub enum ThesaurusError {
    #[error("Concept {0} not found")]
    NotFound(u64),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Cache error: {0}")]
    Cache(String),
}

impl From<reqwest::Error> for ThesaurusError {
    fn from(err: reqwest::Error) -> Self {
        ThesaurusError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ThesaurusError {
    fn from(err: serde_json::Error) -> Self {
        ThesaurusError::Parse(err.to_string())
    }
}

impl From<ErfgoedError> for ThesaurusError {
    fn from(err: ErfgoedError) -> Self {
        ThesaurusError::Cache(err.to_string())
    }
}
