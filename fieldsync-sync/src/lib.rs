//! Sync boundary for fieldsync.
//!
//! The merge in `fieldsync-merge` is pure. This crate is where it meets the
//! outside world:
//!
//! - **Store**: durable cache of the last merged snapshot per entity (the base)
//! - **Transport**: fetches the remote snapshot and writes merged snapshots
//!   back under an optimistic-concurrency guard
//! - **Reporter**: receives every applied merge for display or audit
//! - **Engine**: runs fetch, merge and guarded write-back, merging again when
//!   the remote moved on in between
//!
//! # Example
//!
//! ```
//! use fieldsync_sync::{MemoryRemote, MemorySnapshotStore, SyncConfig, SyncEngine, SyncOutcome};
//! use fieldsync_types::{FieldValue, OriginId, Provenance, Snapshot};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let remote = Arc::new(MemoryRemote::<FieldValue>::new());
//! let store = Arc::new(MemorySnapshotStore::<FieldValue>::new());
//! let engine = SyncEngine::<FieldValue>::new(SyncConfig::default(), store, remote);
//!
//! let origin = OriginId::new("laptop").unwrap();
//! let local: Snapshot = Snapshot::new("task", "1", Provenance::new(origin, 1, 100))
//!     .with_field("title", "Buy milk");
//!
//! let report = engine.sync_entity(&local).await.unwrap();
//! assert_eq!(report.outcome, SyncOutcome::Pushed);
//! # }
//! ```

mod engine;
mod error;
pub mod reporter;
pub mod store;
pub mod transport;

pub use engine::{SyncConfig, SyncEngine, SyncOutcome, SyncReport};
pub use error::{SyncError, SyncResult};
pub use reporter::{AuditEntry, CollectingReporter, ConflictReporter, TracingReporter};
pub use store::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
pub use transport::{MemoryRemote, SyncTransport, WriteOutcome};
