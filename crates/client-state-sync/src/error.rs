//! Error types for remote state sync operations.

use thiserror::Error;

/// Error type for all remote sync operations.
///
/// Supports automatic conversion from reqwest and serde_json errors via #[from].
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network or transport-level HTTP error from reqwest.
    ///
    /// Includes connection failures, timeouts, and TLS errors.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success HTTP status.
    ///
    /// Contains the HTTP status code and response body for debugging.
    /// Common causes: authentication failure, RLS policy violation, schema mismatch.
    #[error("Supabase error: {status} - {message}")]
    Api {
        /// The HTTP status code returned by the API.
        status: u16,
        /// The response body, typically containing error details.
        message: String,
    },

    /// The backing resource does not exist on the remote.
    ///
    /// A recoverable "not configured" condition, distinct from a transient
    /// fault: callers skip the sync silently instead of reporting a failure.
    #[error("Remote resource missing: {0}")]
    ResourceMissing(String),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration or initialization error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
