//! Error types for the events client.

use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur in client operations.
///
/// Soft "not found" conditions (uninitialized stream head, missing proof)
/// are `None` returns, not errors; a failed verification is a
/// `verified: false` result, not an error. Everything here is either a
/// caller mistake caught before I/O or a transport/protocol failure.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid configuration or argument, caught before any I/O.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// HTTP-level failure from the RPC endpoint.
    #[error("RPC transport error ({status}): {message}")]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Status text or response body.
        message: String,
    },

    /// The endpoint returned a JSON-RPC error envelope.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// Remote error code.
        code: i64,
        /// Remote error message.
        message: String,
    },

    /// The response envelope or result did not have the expected shape.
    #[error("malformed RPC response: {0}")]
    MalformedResponse(String),

    /// Network-level request failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding failure on a wire byte field.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Core error (event validation, hashing).
    #[error("core error: {0}")]
    Core(#[from] authlog_core::Error),
}
