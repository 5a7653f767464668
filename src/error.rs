//! Handler error type

use thiserror::Error;

/// Failure returned by an item handler
///
/// Only `Validation` reaches the caller verbatim; the others are logged and
/// surfaced as a generic 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::MalformedBody(_) | Self::NotAnObject(_) | Self::Internal(_) => 500,
        }
    }
}
