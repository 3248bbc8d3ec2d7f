//! Storage error types.
//!
//! Defined in `quizforge-core` so the session can classify persistence
//! failures and degrade gracefully without string matching. A failed save
//! never invalidates in-memory state; it only reduces durability.

use thiserror::Error;

/// Errors that can occur when talking to the durable key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or opened.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// An I/O operation against the store failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing session state for storage failed.
    #[error("failed to serialize session state: {0}")]
    Serialize(#[from] serde_json::Error),
}
