//! Client error types

use shared::error::AppError;
use shared::SlotRejection;
use thiserror::Error;

/// Shown when nothing more specific is available
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong, please try again";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected by backend validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-2xx response, decoded from the error body
    #[error("Server error {}: {}", .0.code, .0.message)]
    Api(AppError),

    /// Refused locally before any request was made
    #[error("Rejected: {0}")]
    Rejected(#[from] SlotRejection),

    /// Local domain check failed (amounts, state transitions)
    #[error("{0}")]
    Domain(#[from] AppError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Message suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(e) if e.is_timeout() => "The server took too long to respond".to_string(),
            Self::Http(e) if e.is_decode() => GENERIC_ERROR_MESSAGE.to_string(),
            Self::Http(_) => "Could not reach the server".to_string(),
            Self::Unauthorized => "Your session has expired, please sign in again".to_string(),
            Self::Forbidden(m) | Self::NotFound(m) | Self::Validation(m) => m.clone(),
            Self::Api(e) | Self::Domain(e) => e.message.clone(),
            Self::Rejected(r) => r.to_string(),
            Self::InvalidResponse(_) | Self::Serialization(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// Failures the operator cannot act on; these get logged as errors
    pub fn is_unexpected(&self) -> bool {
        match self {
            Self::InvalidResponse(_) | Self::Serialization(_) => true,
            Self::Http(e) => e.is_decode() || e.is_builder(),
            Self::Api(e) => !e.code.category().is_user_facing(),
            _ => false,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
