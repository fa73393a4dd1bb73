//! Error types for the merge engine.

use fieldsync_types::EntityRef;
use thiserror::Error;

/// Result type for merge operations.
pub type Result<T> = std::result::Result<T, MergeError>;

/// Errors that can occur when merging snapshots.
///
/// The merge itself is total; the only failure is being handed snapshots of
/// different entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// A snapshot describes a different entity than the remote.
    #[error("entity mismatch: expected {expected}, found {found}")]
    EntityMismatch { expected: EntityRef, found: EntityRef },
}
