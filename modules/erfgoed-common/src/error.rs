use thiserror::Error;

pub type Result<T> = std::result::Result<T, ErfgoedError>;

#[derive(Debug, Error)]
pub enum ErfgoedError {
    #[error("Malformed record {object}: {reason}")]
    MalformedRelation { object: String, reason: String },

    #[error("Concept {0} not found in thesaurus")]
    UnresolvableConcept(u64),

    #[error("Detail record not found: {0}")]
    MissingDetail(String),

    #[error("Fetch failed for {url}: {message}")]
    Fetch {
        url: String,
        message: String,
        fatal: bool,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ErfgoedError {
    /// Whether the error must abort the whole run instead of skipping one object.
    pub fn is_fatal(&self) -> bool {
        match self {
            ErfgoedError::MalformedRelation { .. } | ErfgoedError::MissingDetail(_) => false,
            ErfgoedError::Fetch { fatal, .. } => *fatal,
            ErfgoedError::Json(_) => false,
            ErfgoedError::UnresolvableConcept(_)
            | ErfgoedError::Config(_)
            | ErfgoedError::Cache(_)
            | ErfgoedError::Io(_) => true,
        }
    }

    pub(crate) fn malformed(object: &str, reason: impl Into<String>) -> Self {
        ErfgoedError::MalformedRelation {
            object: object.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_object_errors_are_not_fatal() {
        assert!(!ErfgoedError::MissingDetail("x".into()).is_fatal());
        assert!(!ErfgoedError::malformed("x", "no start").is_fatal());
        assert!(!ErfgoedError::Fetch {
            url: "x".into(),
            message: "bad json".into(),
            fatal: false,
        }
        .is_fatal());
    }

    #[test]
    fn run_level_errors_are_fatal() {
        assert!(ErfgoedError::UnresolvableConcept(53).is_fatal());
        assert!(ErfgoedError::Config("bad".into()).is_fatal());
        assert!(ErfgoedError::Fetch {
            url: "x".into(),
            message: "5 attempts".into(),
            fatal: true,
        }
        .is_fatal());
    }
}
