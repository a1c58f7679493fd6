//! Error types for the portal collaborators.

/// Errors from client-side storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading a key failed.
    #[error("storage read failed for '{key}': {reason}")]
    Read { key: String, reason: String },

    /// Writing or removing a key failed.
    #[error("storage write failed for '{key}': {reason}")]
    Write { key: String, reason: String },
}

/// All errors that can occur when talking to the authentication service or
/// managing the local session.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Missing or invalid configuration.
    #[error("portal config error: {0}")]
    Config(String),

    /// The service answered with an error status and no readable body.
    #[error("auth service error {status_code}: {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Raw body or status text.
        message: String,
    },

    /// Request timed out.
    #[error("auth request timed out")]
    Timeout,

    /// Network or HTTP client error.
    #[error("portal network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("portal json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Session could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
