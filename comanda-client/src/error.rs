//! Client error types

use shared::LedgerError;
use thiserror::Error;

/// Transport-level error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error reported by the backend
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Backend-provided message, when the error body carried one
    ///
    /// The backend reports failures as `{"message": "..."}`; anything else
    /// (network failures, malformed bodies) yields `None` so the caller
    /// falls back to generic copy.
    pub fn backend_message(&self) -> Option<String> {
        match self {
            Self::NotFound(body) | Self::Validation(body) | Self::Internal(body) => {
                extract_message(body)
            }
            _ => None,
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
}

impl From<ClientError> for LedgerError {
    fn from(err: ClientError) -> Self {
        LedgerError::Remote {
            message: err.backend_message(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
