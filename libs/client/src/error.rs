//! Error types for the PBM client
//!
//! Errors are `Clone`: a failed fetch is stored in the query cache and handed
//! to every caller that was waiting on the same request.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Client errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {code}: {}", message.as_deref().unwrap_or("request failed"))]
    HttpStatus { code: u16, message: Option<String> },

    #[error("Not found: {resource}/{id}")]
    NotFound { resource: String, id: i64 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl Error {
    /// HTTP status code, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { code, .. } => Some(*code),
            Error::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Map a 404 on a single-record read to [`Error::NotFound`]
    pub(crate) fn for_record(self, resource: &str, id: i64) -> Self {
        match self {
            Error::HttpStatus { code: 404, .. } => Error::NotFound {
                resource: resource.to_string(),
                id,
            },
            other => other,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Error::HttpStatus {
                code: status.as_u16(),
                message: None,
            }
        } else if err.is_builder() {
            Error::Validation(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<rxboard_models::Error> for Error {
    fn from(err: rxboard_models::Error) -> Self {
        match err {
            rxboard_models::Error::InvalidFieldValue(msg) => Error::Validation(msg),
            other => Error::Decode(other.to_string()),
        }
    }
}
