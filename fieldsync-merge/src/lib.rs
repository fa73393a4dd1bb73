//! Deterministic field-level three-way merge for fieldsync.
//!
//! Given the last synced `base` snapshot of a record and two snapshots that
//! have since diverged (`local` and `remote`), [`merge`] produces one
//! reconciled snapshot plus a log of every field that genuinely conflicted.
//!
//! Components, leaves first:
//!
//! - [`changed`] / [`same`] — value comparison with NaN treated as equal to NaN
//! - [`prioritize`] — total order over [`Provenance`](fieldsync_types::Provenance)
//! - [`resolve`] — the four-case per-field policy
//! - [`merge`] — key union, aggregation, winner and provenance
//!
//! Every merge is:
//! - **Deterministic**: identical inputs give identical results, conflicts
//!   ordered by field name
//! - **Total**: every field of every input appears in `merged.fields`; a
//!   field resolved as absent holds [`MergeValue::absent`](fieldsync_types::MergeValue::absent)
//!   and is also listed in `removed`
//! - **Pure**: no I/O, no shared state; safe to call from any thread
//!
//! # Example
//!
//! ```
//! use fieldsync_merge::{merge, Winner};
//! use fieldsync_types::{OriginId, Provenance, Snapshot};
//!
//! let prov = |o: &str, at| Provenance::new(OriginId::new(o).unwrap(), 1, at);
//! let base: Snapshot = Snapshot::new("task", "1", prov("a", 10)).with_field("title", "Draft");
//! let local = base.clone().with_field("title", "Final").with_provenance(prov("a", 20));
//! let remote = base.clone().with_provenance(prov("b", 15));
//!
//! let result = merge(Some(&base), &local, &remote).unwrap();
//! assert_eq!(result.merged.get("title").and_then(|v| v.as_str()), Some("Final"));
//! assert_eq!(result.winner, Winner::Local);
//! assert!(result.is_clean());
//! ```

mod compare;
mod error;
mod merge;
mod priority;
mod resolver;

pub use compare::{changed, same};
pub use error::{MergeError, Result};
pub use merge::{merge, merge_unchecked, merged_provenance, MergeResult, Winner};
pub use priority::{prioritize, priority_order, Preference};
pub use resolver::{resolve, Baseline, Conflict, Resolution, Side};
