//! Field values carried by snapshots.
//!
//! [`FieldValue`] is the closed set of shapes a field may hold. Composite
//! values (arrays and objects) are opaque to the merge: they are compared and
//! replaced as a whole, never merged element by element. Comparison treats
//! NaN as equal to NaN wherever it appears inside them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single top-level field value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<FieldValue>),
    Object(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Returns true for `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the number, if this is one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns true for arrays and objects.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        Self::Array(items)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<FieldValue> for serde_json::Value {
    /// JSON has no NaN or infinity; those become `null`.
    fn from(value: FieldValue) -> Self {
        use serde_json::Value;
        match value {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(b),
            FieldValue::Number(n) => {
                serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
            }
            FieldValue::String(s) => Value::String(s),
            FieldValue::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            FieldValue::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// A value the merge engine can compare.
///
/// Equality is ordinary value equality, with one exception: two NaN values
/// are considered the same, at any depth. Implementors that can hold NaN
/// report it through [`MergeValue::is_nan`]; containers override
/// [`MergeValue::same_as`] to apply the rule to their elements.
pub trait MergeValue: Clone + PartialEq {
    /// Returns true if this value is the IEEE-754 NaN sentinel.
    fn is_nan(&self) -> bool {
        false
    }

    /// Merge equality: `==`, except that NaN equals NaN.
    fn same_as(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }

    /// The value a merged snapshot holds for a field whose resolution is
    /// "absent", so the field name is never dropped.
    fn absent() -> Self;
}

impl MergeValue for FieldValue {
    fn is_nan(&self) -> bool {
        matches!(self, Self::Number(n) if n.is_nan())
    }

    fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Array(a), Self::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_as(y))
            }
            (Self::Object(a), Self::Object(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.same_as(vb))
            }
            _ => self == other,
        }
    }

    fn absent() -> Self {
        Self::Null
    }
}

impl MergeValue for f64 {
    fn is_nan(&self) -> bool {
        f64::is_nan(*self)
    }

    fn absent() -> Self {
        Self::default()
    }
}

impl MergeValue for f32 {
    fn is_nan(&self) -> bool {
        f32::is_nan(*self)
    }

    fn absent() -> Self {
        Self::default()
    }
}

// Scalars without a null use their zero value.
macro_rules! scalar_merge_value {
    ($($ty:ty),*) => {
        $(impl MergeValue for $ty {
            fn absent() -> Self {
                Self::default()
            }
        })*
    };
}

scalar_merge_value!(i64, u64, bool, String);

// serde_json numbers are always finite.
impl MergeValue for serde_json::Value {
    fn absent() -> Self {
        Self::Null
    }
}
