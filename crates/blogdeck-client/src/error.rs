//! Client error types.

use thiserror::Error;

/// Client error type.
///
/// Failures fall into two classes: transport failures (the request never
/// produced a usable HTTP response, or the HTTP status was not 2xx) and
/// application failures (a well-formed envelope whose `code` is not 200).
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server answered with a non-success HTTP status.
    #[error("HTTP status {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body, if any.
        message: Option<String>,
    },

    /// Server answered 2xx but the envelope carried a failure code.
    #[error("API error ({code}): {message}")]
    Api {
        /// Envelope code.
        code: i64,
        /// Envelope message (or a generic fallback).
        message: String,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if the backend rejected the session, at either layer.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Status { status: 401, .. } | Error::Api { code: 401, .. })
    }

    /// Check if this is an envelope-level (application) failure.
    pub fn is_application(&self) -> bool {
        matches!(self, Error::Api { .. })
    }

    /// Check if this is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Status { .. })
    }

    /// The message supplied by the server, when there was one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } => Some(message),
            Error::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
