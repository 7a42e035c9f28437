use thiserror::Error;

use crate::models::ErrorKind;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("GitHub API error: {0}")]
    ApiError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid API base URL: {0}")]
    BaseUrlError(#[from] url::ParseError),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl LookupError {
    /// Collapses the detailed error into what the user gets to see.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Network,
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
