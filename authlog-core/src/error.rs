//! Error types shared across the workspace.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from core types and the MMR engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Hash parsing or length failure.
    #[error("invalid hash: {0}")]
    InvalidHash(String),

    /// An event failed validation.
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    /// Operation requires a non-empty accumulator.
    #[error("MMR is empty: {0}")]
    EmptyMmr(String),
}
