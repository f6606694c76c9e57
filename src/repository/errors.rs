use thiserror::Error;

/// Shown when the backend gave no usable message.
pub const FALLBACK_MESSAGE: &str = "Could not reach the server";
pub const NOT_FOUND_MESSAGE: &str = "Entity not found";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired, please sign in again";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    /// Backend refused the request; carries its message verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Unexpected(format!("Malformed response: {err}"))
        } else if err.is_builder() {
            RepositoryError::Unexpected(format!("Invalid request: {err}"))
        } else if err.is_timeout() {
            RepositoryError::ConnectionError(format!("Request timed out: {err}"))
        } else {
            RepositoryError::ConnectionError(format!("{FALLBACK_MESSAGE}: {err}"))
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Unexpected(format!("Malformed response: {err}"))
    }
}
