use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("model artifacts unavailable: {0}")]
    ArtifactUnavailable(String),
    #[error("non-finite value in pipeline: {0}")]
    ArithmeticDomain(String),

    #[error("failed to read artifact (path: {path}): {source}", path = path.display())]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact (path: {path}): {source}", path = path.display())]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid artifact: {0}")]
    ArtifactInvalid(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ScoringError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type ScoringResult<T> = std::result::Result<T, ScoringError>;
