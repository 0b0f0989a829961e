//! Error types for the booking API client.
//!
//! # Design
//! Every non-2xx response collapses into `ApiError::Http`, whose display text
//! is exactly the normalized message (the body's `message` field, or
//! `HTTP <status>`). Pages store `to_string()` of any variant as their single
//! display string.

use thiserror::Error;

/// Errors returned by `BookingClient` parse methods and `BookingApi`
/// accessors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside 2xx.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (connection refused, timeout...).
    #[error("{0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Rejected locally before any request was built.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Missing or unusable client configuration. Fatal at start-up.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is missing")]
    Missing(&'static str),

    #[error("invalid API base URL {0:?}: must start with http:// or https://")]
    InvalidUrl(String),
}
