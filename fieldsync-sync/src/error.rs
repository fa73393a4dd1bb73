//! Error types for the sync layer.

use fieldsync_merge::MergeError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur in sync operations.
///
/// A write-back rejected because the remote moved on is not an error; see
/// [`WriteOutcome::Stale`](crate::WriteOutcome::Stale).
#[derive(Debug, Error)]
pub enum SyncError {
    /// The merge refused its inputs.
    #[error("merge error: {0}")]
    Merge(#[from] MergeError),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(String),

    /// Every write-back attempt found the remote changed underneath it.
    #[error("gave up syncing {entity} after {attempts} attempts")]
    RetriesExhausted { entity: String, attempts: u32 },
}
