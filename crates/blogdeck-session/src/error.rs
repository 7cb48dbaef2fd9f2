//! Error types for session and storage operations.

/// Errors from the durable key/value storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The backing file is not a JSON object of strings.
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Errors from decoding an obfuscated token.
#[derive(Debug, thiserror::Error)]
pub enum ObfuscateError {
    /// Keys must be non-empty ASCII.
    #[error("obfuscation key must be non-empty ASCII")]
    InvalidKey,

    /// Token is not valid base64.
    #[error("token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded token is not a valid escaped string.
    #[error("token has an invalid escape sequence: {0}")]
    Escape(#[from] std::string::FromUtf8Error),

    /// Unmasked text is not valid UTF-16.
    #[error("token does not decode to text: {0}")]
    Text(#[from] std::string::FromUtf16Error),
}

/// Error type for session operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend call failed; the gateway already notified the user.
    #[error(transparent)]
    Client(#[from] blogdeck_client::Error),

    /// Persisting session state failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Operation needs a signed-in user.
    #[error("not signed in")]
    NotSignedIn,
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, Error>;
