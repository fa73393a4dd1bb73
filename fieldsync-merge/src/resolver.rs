//! Per-field resolution.
//!
//! Each field falls into one of four cases relative to the base:
//!
//! 1. Neither side changed: keep the base value.
//! 2. Only remote changed: take remote.
//! 3. Only local changed: take local.
//! 4. Both changed: if they agree, take the common value; otherwise the
//!    provenance priority picks a side and the disagreement is recorded as a
//!    [`Conflict`].
//!
//! Without a base, both sides always count as changed, so a first sync only
//! reaches case 4.

use crate::compare::changed;
use crate::priority::{prioritize, Preference};
use fieldsync_types::{MergeValue, Provenance};
use serde::{Deserialize, Serialize};

/// One of the two diverged sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Local,
    Remote,
}

/// A field both sides changed to different values, and how it was resolved.
///
/// `None` means the field was absent from that snapshot (or, for
/// `resolved_value`, that the field was removed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict<V> {
    pub field: String,
    pub base_value: Option<V>,
    pub local_value: Option<V>,
    pub remote_value: Option<V>,
    pub resolved_value: Option<V>,
    pub winner: Side,
}

/// What the base snapshot says about a field.
#[derive(Debug)]
pub enum Baseline<'a, V> {
    /// There is no base snapshot at all (first sync).
    Missing,
    /// The base snapshot's value for the field; `None` if the base lacks it.
    Known(Option<&'a V>),
}

/// Outcome of resolving one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<V> {
    /// The resolved value; `None` removes the field.
    pub value: Option<V>,
    /// Set only when both sides changed the field to different values.
    pub conflict: Option<Conflict<V>>,
    /// Which side's change was accepted, if exactly one side's was.
    pub contribution: Option<Side>,
}

/// Resolves a single field from its base, local and remote values.
#[must_use]
pub fn resolve<V: MergeValue>(
    field: &str,
    base: Baseline<'_, V>,
    local: Option<&V>,
    remote: Option<&V>,
    local_prov: &Provenance,
    remote_prov: &Provenance,
) -> Resolution<V> {
    let (base_value, local_changed, remote_changed) = match base {
        Baseline::Missing => (None, true, true),
        Baseline::Known(b) => (b, changed(b, local), changed(b, remote)),
    };

    match (local_changed, remote_changed) {
        (false, false) => Resolution {
            value: base_value.cloned(),
            conflict: None,
            contribution: None,
        },
        (false, true) => Resolution {
            value: remote.cloned(),
            conflict: None,
            contribution: Some(Side::Remote),
        },
        (true, false) => Resolution {
            value: local.cloned(),
            conflict: None,
            contribution: Some(Side::Local),
        },
        (true, true) if !changed(local, remote) => Resolution {
            value: local.cloned(),
            conflict: None,
            contribution: None,
        },
        (true, true) => {
            let (winner, value) = match prioritize(local_prov, remote_prov) {
                Preference::A => (Side::Local, local.cloned()),
                Preference::B => (Side::Remote, remote.cloned()),
            };
            Resolution {
                conflict: Some(Conflict {
                    field: field.to_string(),
                    base_value: base_value.cloned(),
                    local_value: local.cloned(),
                    remote_value: remote.cloned(),
                    resolved_value: value.clone(),
                    winner,
                }),
                value,
                contribution: Some(winner),
            }
        }
    }
}
