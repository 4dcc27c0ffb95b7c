use std::path::PathBuf;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no API key configured (set api.api_key or BRAINBOARD_API_KEY)")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unauthorized: the backend rejected the API key")]
    Unauthorized,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("server returned {status}: {reason}")]
    Status { status: u16, reason: String },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("malformed record: {0}")]
    Malformed(String),
    #[error("no knowledge was updated")]
    NothingUpdated,
    #[error("{0} does not accept new knowledge")]
    ReadOnlyBrain(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::MissingApiKey)
    }
}
