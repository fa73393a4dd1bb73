//! Sync engine: the guarded fetch, merge, write-back loop.
//!
//! The merge itself is pure; all I/O happens here, through the store and
//! transport the engine is built with. If the remote changes between fetch
//! and write-back, the engine refetches and merges again, up to
//! [`SyncConfig::max_attempts`] times (at least once).

use crate::error::{SyncError, SyncResult};
use crate::reporter::{ConflictReporter, TracingReporter};
use crate::store::SnapshotStore;
use crate::transport::{SyncTransport, WriteOutcome};
use fieldsync_merge::{merge, merge_unchecked, same, MergeResult};
use fieldsync_types::{now_millis, EntityRef, Fields, MergeValue, Snapshot};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Configuration for the sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Device name for log messages.
    pub device_name: String,
    /// Fetch/merge/write-back rounds before giving up. At least one round
    /// always runs, so 0 behaves like 1.
    pub max_attempts: u32,
    /// Pause before merging again after a stale write-back (ms).
    pub retry_delay_ms: u64,
    /// Reject merges whose snapshots describe different entities.
    pub check_identity: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            device_name: "fieldsync device".to_string(),
            max_attempts: 5,
            retry_delay_ms: 50,
            check_identity: true,
        }
    }
}

impl SyncConfig {
    /// Parses a configuration from JSON; missing keys take their defaults.
    pub fn from_json(json: &str) -> SyncResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// How a sync round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The remote had no snapshot; local was pushed as is.
    Pushed,
    /// The merge produced exactly the remote's fields; nothing was written.
    UpToDate,
    /// The merged snapshot was written back.
    Committed,
}

/// Report of one successful `sync_entity` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport<V> {
    pub entity: EntityRef,
    pub outcome: SyncOutcome,
    /// Rounds used, starting at 1.
    pub attempts: u32,
    /// The merge applied in the final round; `None` for [`SyncOutcome::Pushed`].
    pub result: Option<MergeResult<V>>,
}

/// Drives merges against a store and a transport.
pub struct SyncEngine<V: Send + Sync + 'static> {
    config: SyncConfig,
    store: Arc<dyn SnapshotStore<V>>,
    transport: Arc<dyn SyncTransport<V>>,
    reporter: Arc<dyn ConflictReporter<V>>,
}

impl<V> SyncEngine<V>
where
    V: MergeValue + Debug + Send + Sync + 'static,
{
    /// Creates an engine that reports conflicts through `tracing`.
    pub fn new(
        config: SyncConfig,
        store: Arc<dyn SnapshotStore<V>>,
        transport: Arc<dyn SyncTransport<V>>,
    ) -> Self {
        Self::with_reporter(config, store, transport, Arc::new(TracingReporter))
    }

    /// Creates an engine with a custom conflict reporter.
    pub fn with_reporter(
        config: SyncConfig,
        store: Arc<dyn SnapshotStore<V>>,
        transport: Arc<dyn SyncTransport<V>>,
        reporter: Arc<dyn ConflictReporter<V>>,
    ) -> Self {
        Self {
            config,
            store,
            transport,
            reporter,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Reconciles `local` with the remote copy of the same entity.
    ///
    /// On success the new base has been saved to the store and, if anything
    /// was written, the remote holds the merged snapshot.
    pub async fn sync_entity(&self, local: &Snapshot<V>) -> SyncResult<SyncReport<V>> {
        let entity = local.entity_ref();
        let max_attempts = self.config.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            if attempt > 1 && self.config.retry_delay_ms > 0 {
                sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
            }
            let base = self.store.load_base(&entity)?;

            let Some(remote) = self.transport.fetch_remote(&entity).await? else {
                match self.transport.write_back(None, local).await? {
                    WriteOutcome::Committed => {
                        self.store.save_base(local)?;
                        info!("[{}] Pushed new entity {}", self.config.device_name, entity);
                        return Ok(SyncReport {
                            entity,
                            outcome: SyncOutcome::Pushed,
                            attempts: attempt,
                            result: None,
                        });
                    }
                    WriteOutcome::Stale => {
                        warn!(
                            "[{}] {} appeared on the remote during push (attempt {}/{})",
                            self.config.device_name, entity, attempt, max_attempts
                        );
                        continue;
                    }
                }
            };

            let mut result = if self.config.check_identity {
                merge(base.as_ref(), local, &remote)?
            } else {
                merge_unchecked(base.as_ref(), local, &remote)
            };

            if fields_match(&result.merged.fields, &remote.fields) {
                self.store.save_base(&result.merged)?;
                self.reporter.report(&entity, &result);
                debug!("[{}] {} already up to date", self.config.device_name, entity);
                return Ok(SyncReport {
                    entity,
                    outcome: SyncOutcome::UpToDate,
                    attempts: attempt,
                    result: Some(result),
                });
            }

            // The write must move the remote to a new revision, or a writer still
            // holding the old one could pass the guard and overwrite it.
            if result.merged.provenance.same_revision(&remote.provenance) {
                result.merged.provenance = result.merged.provenance.next(now_millis());
            }

            match self
                .transport
                .write_back(Some(&remote.provenance), &result.merged)
                .await?
            {
                WriteOutcome::Committed => {
                    self.store.save_base(&result.merged)?;
                    self.reporter.report(&entity, &result);
                    info!(
                        "[{}] Synced {}: {} conflicts, winner {:?}",
                        self.config.device_name,
                        entity,
                        result.conflicts.len(),
                        result.winner
                    );
                    return Ok(SyncReport {
                        entity,
                        outcome: SyncOutcome::Committed,
                        attempts: attempt,
                        result: Some(result),
                    });
                }
                WriteOutcome::Stale => {
                    warn!(
                        "[{}] Remote {} changed during sync (attempt {}/{}), merging again",
                        self.config.device_name, entity, attempt, max_attempts
                    );
                }
            }
        }

        Err(SyncError::RetriesExhausted {
            entity: entity.to_string(),
            attempts: max_attempts,
        })
    }
}

/// Field-by-field equality using the merge's notion of sameness.
fn fields_match<V: MergeValue>(a: &Fields<V>, b: &Fields<V>) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b.iter())
            .all(|((ka, va), (kb, vb))| ka == kb && same(va, vb))
}
