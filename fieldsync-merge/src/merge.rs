//! Merge orchestration.
//!
//! Drives the field resolver over the union of field names of base, local
//! and remote, in field-name order, and assembles the merged snapshot, the
//! conflict log and the overall winner. The merged snapshot has exactly the
//! union of field names; none is ever dropped.

use crate::error::{MergeError, Result};
use crate::priority::{prioritize, Preference};
use crate::resolver::{resolve, Baseline, Conflict, Side};
use fieldsync_types::{FieldValue, Fields, MergeValue, Provenance, Snapshot};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Which side(s) contributed accepted changes to a merge.
///
/// Fields that both sides changed to the same value count for neither side,
/// and a merge in which no side contributed anything reports `Remote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Local,
    Remote,
    Mixed,
}

/// Output of a three-way merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeResult<V = FieldValue> {
    /// The reconciled snapshot; identity is always taken from remote.
    pub merged: Snapshot<V>,
    /// Genuine conflicts, ordered by field name.
    pub conflicts: Vec<Conflict<V>>,
    /// Overall winner classification.
    pub winner: Winner,
    /// Fields whose resolved value is absent. They are still present in
    /// `merged.fields`, holding [`MergeValue::absent`].
    pub removed: Vec<String>,
}

impl<V> MergeResult<V> {
    /// Returns true if no field conflicted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Returns the conflict recorded for `field`, if any.
    #[must_use]
    pub fn conflict(&self, field: &str) -> Option<&Conflict<V>> {
        self.conflicts.iter().find(|c| c.field == field)
    }
}

/// Merges `local` and `remote` against their common `base`.
///
/// `base` is `None` when the two sides have never been synced. Fails with
/// [`MergeError::EntityMismatch`] if `local` or `base` describe a different
/// entity than `remote`.
pub fn merge<V: MergeValue>(
    base: Option<&Snapshot<V>>,
    local: &Snapshot<V>,
    remote: &Snapshot<V>,
) -> Result<MergeResult<V>> {
    if !local.same_entity(remote) {
        return Err(MergeError::EntityMismatch {
            expected: remote.entity_ref(),
            found: local.entity_ref(),
        });
    }
    if let Some(base) = base.filter(|b| !b.same_entity(remote)) {
        return Err(MergeError::EntityMismatch {
            expected: remote.entity_ref(),
            found: base.entity_ref(),
        });
    }
    Ok(merge_unchecked(base, local, remote))
}

/// [`merge`] without the entity identity check.
///
/// For callers that already guarantee all three snapshots describe the same
/// entity. Identity of the result still comes from `remote`.
#[must_use]
pub fn merge_unchecked<V: MergeValue>(
    base: Option<&Snapshot<V>>,
    local: &Snapshot<V>,
    remote: &Snapshot<V>,
) -> MergeResult<V> {
    let names: BTreeSet<&str> = base
        .into_iter()
        .flat_map(|b| b.fields.keys())
        .chain(local.fields.keys())
        .chain(remote.fields.keys())
        .map(String::as_str)
        .collect();

    let mut fields: Fields<V> = BTreeMap::new();
    let mut conflicts = Vec::new();
    let mut removed = Vec::new();
    let mut had_local = false;
    let mut had_remote = false;

    for name in names {
        let baseline = match base {
            Some(b) => Baseline::Known(b.fields.get(name)),
            None => Baseline::Missing,
        };
        let resolution = resolve(
            name,
            baseline,
            local.fields.get(name),
            remote.fields.get(name),
            &local.provenance,
            &remote.provenance,
        );

        match resolution.contribution {
            Some(Side::Local) => had_local = true,
            Some(Side::Remote) => had_remote = true,
            None => {}
        }
        if let Some(conflict) = resolution.conflict {
            trace!("Field {} conflicted, {:?} wins", name, conflict.winner);
            conflicts.push(conflict);
        }
        let value = resolution.value.unwrap_or_else(|| {
            removed.push(name.to_string());
            V::absent()
        });
        fields.insert(name.to_string(), value);
    }

    let winner = match (had_local, had_remote) {
        (true, true) => Winner::Mixed,
        (true, false) => Winner::Local,
        (false, _) => Winner::Remote,
    };

    debug!(
        "Merged {}/{}: {} fields, {} conflicts, winner {:?}",
        remote.entity_type,
        remote.entity_id,
        fields.len(),
        conflicts.len(),
        winner
    );

    MergeResult {
        merged: Snapshot {
            entity_type: remote.entity_type.clone(),
            entity_id: remote.entity_id.clone(),
            fields,
            provenance: merged_provenance(&local.provenance, &remote.provenance),
        },
        conflicts,
        winner,
        removed,
    }
}

/// Provenance of a merged snapshot.
///
/// Version and update time are the maxima of both sides. The origin comes
/// from whichever side has priority as a whole, independent of which side won
/// individual fields.
#[must_use]
pub fn merged_provenance(local: &Provenance, remote: &Provenance) -> Provenance {
    let origin_id = match prioritize(local, remote) {
        Preference::A => local.origin_id.clone(),
        Preference::B => remote.origin_id.clone(),
    };
    Provenance {
        origin_id,
        version: local.version.max(remote.version),
        updated_at: local.updated_at.max(remote.updated_at),
    }
}
