//! Transport layer abstraction.
//!
//! A transport fetches the authoritative remote snapshot of an entity and
//! writes merged snapshots back under an optimistic-concurrency guard: the
//! write only lands if the remote is still at the revision the merge used.

use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;
use fieldsync_types::{EntityRef, Provenance, Snapshot};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Result of a guarded write-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    /// The remote accepted the snapshot.
    Committed,
    /// The remote moved on since it was fetched; refetch and merge again.
    Stale,
}

/// A sync transport that reads and guardedly writes remote snapshots.
#[async_trait]
pub trait SyncTransport<V: Send + Sync + 'static>: Send + Sync {
    /// Fetches the current remote snapshot, or `None` if the remote has never
    /// seen the entity.
    async fn fetch_remote(&self, entity: &EntityRef) -> SyncResult<Option<Snapshot<V>>>;

    /// Writes `snapshot` if the remote is still at `expected`.
    ///
    /// `expected` is the provenance of the remote snapshot the merge used, or
    /// `None` if the remote had no snapshot. Only `version` and `updated_at`
    /// are compared.
    async fn write_back(
        &self,
        expected: Option<&Provenance>,
        snapshot: &Snapshot<V>,
    ) -> SyncResult<WriteOutcome>;
}

/// In-memory remote with optimistic-concurrency checks.
///
/// Stands in for a shared remote store: every device holding a clone of the
/// same `Arc<MemoryRemote>` sees the same snapshots.
pub struct MemoryRemote<V> {
    snapshots: Mutex<HashMap<EntityRef, Snapshot<V>>>,
}

impl<V: Clone> MemoryRemote<V> {
    /// Creates an empty remote.
    pub fn new() -> Self {
        Self {
            snapshots: Mutex::new(HashMap::new()),
        }
    }

    /// Unconditionally stores a snapshot, as another writer would.
    pub fn put(&self, snapshot: Snapshot<V>) -> SyncResult<()> {
        let mut snapshots = self.lock()?;
        snapshots.insert(snapshot.entity_ref(), snapshot);
        Ok(())
    }

    /// Returns the stored snapshot for an entity.
    pub fn get(&self, entity: &EntityRef) -> SyncResult<Option<Snapshot<V>>> {
        Ok(self.lock()?.get(entity).cloned())
    }

    fn lock(&self) -> SyncResult<std::sync::MutexGuard<'_, HashMap<EntityRef, Snapshot<V>>>> {
        self.snapshots
            .lock()
            .map_err(|_| SyncError::Transport("remote lock poisoned".to_string()))
    }
}

impl<V: Clone> Default for MemoryRemote<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> SyncTransport<V> for MemoryRemote<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn fetch_remote(&self, entity: &EntityRef) -> SyncResult<Option<Snapshot<V>>> {
        self.get(entity)
    }

    async fn write_back(
        &self,
        expected: Option<&Provenance>,
        snapshot: &Snapshot<V>,
    ) -> SyncResult<WriteOutcome> {
        let entity = snapshot.entity_ref();
        let mut snapshots = self.lock()?;

        let current = snapshots.get(&entity).map(|s| &s.provenance);
        let fresh = match (current, expected) {
            (None, None) => true,
            (Some(current), Some(expected)) => current.same_revision(expected),
            _ => false,
        };
        if !fresh {
            debug!("Rejected stale write-back for {}", entity);
            return Ok(WriteOutcome::Stale);
        }

        snapshots.insert(entity, snapshot.clone());
        Ok(WriteOutcome::Committed)
    }
}
