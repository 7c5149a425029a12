use erfgoed_common::ErfgoedError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InventarisError>;

#[derive(Debug, Error)]
pub enum InventarisError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Gave up on {url} after {attempts} attempts")]
    RetriesExhausted { url: String, attempts: u32 },

    #[error("Cache error: {0}")]
    Cache(String),
}

impl InventarisError {
    /// Exhausted retries and cache failures end the run; anything else only loses one record.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            InventarisError::RetriesExhausted { .. } | InventarisError::Cache(_)
        )
    }

    pub fn into_fetch_error(self, url: &str) -> ErfgoedError {
        match self {
            InventarisError::Cache(message) => ErfgoedError::Cache(message),
            other => ErfgoedError::Fetch {
                url: url.to_string(),
                fatal: other.is_fatal(),
                message: other.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for InventarisError {
    fn from(err: reqwest::Error) -> Self {
        InventarisError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for InventarisError {
    fn from(err: serde_json::Error) -> Self {
        InventarisError::Parse(err.to_string())
    }
}

impl From<ErfgoedError> for InventarisError {
    fn from(err: ErfgoedError) -> Self {
        InventarisError::Cache(err.to_string())
    }
}
