//! Error types for the remote storefront API.

use thiserror::Error;

/// Everything that can go wrong between asking the remote service and holding a validated
/// domain value.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// No response reached the client (connect failure, timeout, broken body).
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status.
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// The body could not be decoded or failed validation.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The HTTP client could not be built from the configuration.
    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

impl ApiError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        ApiError::Malformed(msg.into())
    }

    /// Status code for [`ApiError::Server`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
