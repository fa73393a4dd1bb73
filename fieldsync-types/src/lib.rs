//! Core type definitions for fieldsync.
//!
//! This crate defines the data model shared by the merge engine and the sync
//! boundary:
//! - Origin ids and entity references
//! - Provenance records (origin, version, update time)
//! - Field values and snapshots
//!
//! Nothing here knows how to merge; see `fieldsync-merge` for that.

mod ids;
mod provenance;
mod snapshot;
mod value;

pub use ids::{EntityRef, OriginId};
pub use provenance::{now_millis, Provenance};
pub use snapshot::{Fields, Snapshot};
pub use value::{FieldValue, MergeValue};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("origin id must not be empty")]
    EmptyOriginId,

    #[error("snapshot data for {0} is not a JSON object")]
    NotAnObject(String),
}
