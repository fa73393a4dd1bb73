//! Snapshot stores.
//!
//! A store holds the last successfully merged snapshot of each entity (the
//! "base" of the next merge). It is the only writer of a new base.

use crate::error::{SyncError, SyncResult};
use fieldsync_types::{EntityRef, Snapshot};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use tracing::debug;

/// Durable cache of base snapshots.
pub trait SnapshotStore<V>: Send + Sync {
    /// Returns the base snapshot for an entity, or `None` before its first sync.
    fn load_base(&self, entity: &EntityRef) -> SyncResult<Option<Snapshot<V>>>;

    /// Replaces the base snapshot of the snapshot's entity.
    fn save_base(&self, snapshot: &Snapshot<V>) -> SyncResult<()>;
}

/// In-memory snapshot store.
pub struct MemorySnapshotStore<V> {
    bases: Mutex<HashMap<EntityRef, Snapshot<V>>>,
}

impl<V> MemorySnapshotStore<V> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            bases: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the number of stored bases.
    pub fn len(&self) -> usize {
        self.bases.lock().map(|b| b.len()).unwrap_or(0)
    }

    /// Returns true if no base is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Default for MemorySnapshotStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send> SnapshotStore<V> for MemorySnapshotStore<V> {
    fn load_base(&self, entity: &EntityRef) -> SyncResult<Option<Snapshot<V>>> {
        let bases = self
            .bases
            .lock()
            .map_err(|_| SyncError::Storage("snapshot store lock poisoned".to_string()))?;
        Ok(bases.get(entity).cloned())
    }

    fn save_base(&self, snapshot: &Snapshot<V>) -> SyncResult<()> {
        let mut bases = self
            .bases
            .lock()
            .map_err(|_| SyncError::Storage("snapshot store lock poisoned".to_string()))?;
        bases.insert(snapshot.entity_ref(), snapshot.clone());
        Ok(())
    }
}

/// Snapshot store keeping one JSON file per entity under a root directory.
///
/// Layout: `<root>/<hex(entity_type)>/<hex(entity_id)>.json`. Names are hex
/// encoded so any entity id maps to a safe file name. Writes go through a
/// temporary file in the same directory and are renamed into place.
pub struct FileSnapshotStore {
    root: PathBuf,
}

impl FileSnapshotStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> SyncResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn type_dir(&self, entity_type: &str) -> PathBuf {
        self.root.join(hex::encode(entity_type))
    }

    fn path_for(&self, entity: &EntityRef) -> PathBuf {
        self.type_dir(&entity.entity_type)
            .join(format!("{}.json", hex::encode(&entity.entity_id)))
    }
}

impl<V> SnapshotStore<V> for FileSnapshotStore
where
    V: Serialize + DeserializeOwned,
{
    fn load_base(&self, entity: &EntityRef) -> SyncResult<Option<Snapshot<V>>> {
        match fs::read(self.path_for(entity)) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save_base(&self, snapshot: &Snapshot<V>) -> SyncResult<()> {
        let dir = self.type_dir(&snapshot.entity_type);
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer(&mut tmp, snapshot)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;

        let path = self.path_for(&snapshot.entity_ref());
        tmp.persist(&path).map_err(|e| SyncError::Io(e.error))?;
        debug!("Saved base for {} to {}", snapshot.entity_ref(), path.display());
        Ok(())
    }
}
