//! Value comparison.
//!
//! Decides whether a field changed relative to a baseline. Equality is plain
//! value equality, except that two NaN values count as the same value, also
//! inside arrays and objects. Arrays and objects are compared as whole atoms.

use fieldsync_types::MergeValue;

/// Returns true if two present values are the same for merge purposes.
#[must_use]
pub fn same<V: MergeValue>(a: &V, b: &V) -> bool {
    a.same_as(b)
}

/// Returns true if `b` differs from `a`.
///
/// `None` means the field is absent. Absent vs absent is unchanged; absent vs
/// present is a change in either direction.
#[must_use]
pub fn changed<V: MergeValue>(a: Option<&V>, b: Option<&V>) -> bool {
    match (a, b) {
        (None, None) => false,
        (Some(a), Some(b)) => !same(a, b),
        _ => true,
    }
}
