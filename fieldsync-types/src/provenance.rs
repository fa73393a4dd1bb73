//! Provenance of a snapshot: who wrote it, which of their commits it was,
//! and when.
//!
//! Within one origin, `version` and `updated_at` never decrease across
//! successive commits. Callers maintain that; [`Provenance::next`] is the
//! easy way to do it.

use crate::OriginId;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Provenance record attached to every snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provenance {
    /// Writer (device or session) that produced the snapshot.
    pub origin_id: OriginId,
    /// Per-origin commit counter.
    pub version: u64,
    /// Wall-clock update time in milliseconds since the Unix epoch.
    pub updated_at: u64,
}

impl Provenance {
    /// Creates a provenance from its components.
    #[must_use]
    pub const fn new(origin_id: OriginId, version: u64, updated_at: u64) -> Self {
        Self {
            origin_id,
            version,
            updated_at,
        }
    }

    /// Creates the first provenance of an origin, stamped with the current time.
    #[must_use]
    pub fn initial(origin_id: OriginId) -> Self {
        Self::new(origin_id, 0, now_millis())
    }

    /// Provenance of the next commit by the same origin.
    ///
    /// The version is bumped and the update time never goes backwards, even if
    /// `now_ms` is behind the previous commit.
    #[must_use]
    pub fn next(&self, now_ms: u64) -> Self {
        Self {
            origin_id: self.origin_id.clone(),
            version: self.version.saturating_add(1),
            updated_at: self.updated_at.max(now_ms),
        }
    }

    /// [`Provenance::next`] against the system clock.
    #[must_use]
    pub fn tick(&self) -> Self {
        self.next(now_millis())
    }

    /// Returns true if both records carry the same version and update time.
    ///
    /// This is the assertion a guarded write-back makes against the remote.
    #[must_use]
    pub fn same_revision(&self, other: &Self) -> bool {
        self.version == other.version && self.updated_at == other.updated_at
    }
}

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
#[must_use]
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
