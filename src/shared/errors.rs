use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Chat session not found: {0}")]
    NotFound(String),

    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl AppError {
    /// True when the error came out of the remote path and a fallback
    /// data source may still be able to serve the operation.
    pub fn is_fallback_candidate(&self) -> bool {
        !matches!(self, AppError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
