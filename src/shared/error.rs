//! Shared Error Types
//!
//! This module defines the error types used across the crate.
//!
//! # Error Categories
//!
//! - `SharedError` - payloads that fail to decode into shared types
//! - `GatewayError` - failures reported by the remote backend
//!
//! Field-level form errors are not errors in this sense; they are returned
//! as [`FieldErrors`](crate::shared::validation::FieldErrors) and never reach
//! the gateway.
//!
//! # Usage
//!
//! ```rust
//! use gazi_admin::shared::error::GatewayError;
//!
//! let error = GatewayError::auth(None);
//! assert_eq!(error.user_message(), "An unknown error occurred.");
//! ```
use thiserror::Error;

/// Message shown when a backend error carries no usable text.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Shared error types for data crossing the gateway boundary
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

/// Failure of a remote gateway call.
///
/// Every variant is recoverable: controllers turn it into a notification
/// and wait for the user to retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Credentials rejected or malformed. `message` is the backend's own
    /// text, or `None` when the error body had an unrecognized shape.
    #[error("authentication failed: {}", .message.as_deref().unwrap_or(UNKNOWN_ERROR_MESSAGE))]
    Auth { message: Option<String> },

    /// The mutation or deletion target does not exist.
    #[error("record not found: {id}")]
    NotFound { id: String },

    /// Any other failure (connectivity, server errors, bad payloads).
    #[error("gateway unavailable: {message}")]
    Transient { message: String },
}

impl GatewayError {
    pub fn auth(message: Option<String>) -> Self {
        Self::Auth { message }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    /// Text shown to the user for this error, verbatim from the backend
    /// where one was provided.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth { message: Some(message) } if !message.trim().is_empty() => message.clone(),
            Self::Auth { .. } => UNKNOWN_ERROR_MESSAGE.to_string(),
            Self::NotFound { id } => format!("Record not found: {}", id),
            Self::Transient { message } => message.clone(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::transient(format!("Network error: {}", err))
    }
}

impl From<SharedError> for GatewayError {
    fn from(err: SharedError) -> Self {
        Self::transient(err.to_string())
    }
}
