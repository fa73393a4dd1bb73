//! Provenance priority.
//!
//! A total, deterministic order over provenance records, used to pick a side
//! whenever local and remote genuinely disagree:
//!
//! 1. Higher `updated_at` wins.
//! 2. Then higher `version` wins.
//! 3. Then the lexicographically smaller `origin_id` wins.
//! 4. If all three are equal, the first argument wins.

use fieldsync_types::Provenance;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which of two provenance records has priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    A,
    B,
}

/// Compares two provenance records by merge priority.
///
/// `Greater` means `a` has priority over `b`. `Equal` only when all three
/// components are equal.
#[must_use]
pub fn priority_order(a: &Provenance, b: &Provenance) -> Ordering {
    a.updated_at
        .cmp(&b.updated_at)
        .then_with(|| a.version.cmp(&b.version))
        // Smaller origin id wins, so the comparison is reversed.
        .then_with(|| b.origin_id.cmp(&a.origin_id))
}

/// Picks the provenance with priority. Never ties: full equality goes to `a`.
#[must_use]
pub fn prioritize(a: &Provenance, b: &Provenance) -> Preference {
    match priority_order(a, b) {
        Ordering::Less => Preference::B,
        Ordering::Greater | Ordering::Equal => Preference::A,
    }
}
