//! Conflict reporting.
//!
//! Reporters receive the result of every applied merge so conflicts can be
//! shown to a user or written to an audit trail. Nothing is hidden or
//! redacted.

use fieldsync_merge::{Conflict, MergeResult, Winner};
use fieldsync_types::EntityRef;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// Consumer of merge results.
pub trait ConflictReporter<V>: Send + Sync {
    /// Called once per applied merge, after the new base was saved.
    fn report(&self, entity: &EntityRef, result: &MergeResult<V>);
}

/// Logs each conflict through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl<V: Debug> ConflictReporter<V> for TracingReporter {
    fn report(&self, entity: &EntityRef, result: &MergeResult<V>) {
        for conflict in &result.conflicts {
            info!(
                "Conflict on {} field {}: local {:?}, remote {:?}, {:?} wins",
                entity,
                conflict.field,
                conflict.local_value,
                conflict.remote_value,
                conflict.winner
            );
        }
    }
}

/// One audit record: the conflicts of a single applied merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry<V> {
    pub entity: EntityRef,
    pub winner: Winner,
    pub conflicts: Vec<Conflict<V>>,
}

/// Keeps an in-memory audit trail of every merge that had conflicts.
pub struct CollectingReporter<V> {
    entries: Mutex<Vec<AuditEntry<V>>>,
}

impl<V: Clone> CollectingReporter<V> {
    /// Creates an empty reporter.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of the audit trail, oldest first.
    pub fn entries(&self) -> Vec<AuditEntry<V>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the total number of recorded conflicts.
    pub fn conflict_count(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|e| e.conflicts.len())
            .sum()
    }
}

impl<V: Clone> Default for CollectingReporter<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send> ConflictReporter<V> for CollectingReporter<V> {
    fn report(&self, entity: &EntityRef, result: &MergeResult<V>) {
        if result.conflicts.is_empty() {
            return;
        }
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(AuditEntry {
                entity: entity.clone(),
                winner: result.winner,
                conflicts: result.conflicts.clone(),
            });
    }
}
