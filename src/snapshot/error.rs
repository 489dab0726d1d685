//! Snapshot transport error types

use thiserror::Error;

/// Errors that can occur when talking to the snapshot indexer
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// No snapshot endpoint is configured for the chain
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(u64),

    /// Address is not a 0x-prefixed 20-byte hex string
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Indexer answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Snapshot indexer unavailable")]
    Unavailable,
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Decode(err.to_string())
    }
}

/// Result type alias for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;
