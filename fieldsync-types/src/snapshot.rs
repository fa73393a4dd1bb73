//! Snapshots: an immutable capture of one entity's flat field set plus
//! provenance.

use crate::{EntityRef, Error, FieldValue, Provenance, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat mapping of field name to value, ordered by field name.
pub type Fields<V = FieldValue> = BTreeMap<String, V>;

/// One entity's fields as seen by one writer at one point in time.
///
/// Snapshots are values: the builder methods consume and return a new
/// snapshot rather than mutating a shared one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<V = FieldValue> {
    pub entity_type: String,
    pub entity_id: String,
    pub fields: Fields<V>,
    pub provenance: Provenance,
}

impl<V> Snapshot<V> {
    /// Creates a snapshot with no fields.
    #[must_use]
    pub fn new(
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        provenance: Provenance,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            fields: BTreeMap::new(),
            provenance,
        }
    }

    /// Creates an empty snapshot for an existing entity reference.
    #[must_use]
    pub fn for_entity(entity: &EntityRef, provenance: Provenance) -> Self {
        Self::new(entity.entity_type.clone(), entity.entity_id.clone(), provenance)
    }

    /// Returns this snapshot with `field` set to `value`.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<V>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns this snapshot with every pair from `fields` set.
    #[must_use]
    pub fn with_fields<K, I>(mut self, fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.fields
            .extend(fields.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }

    /// Returns this snapshot without `field`.
    #[must_use]
    pub fn without_field(mut self, field: &str) -> Self {
        self.fields.remove(field);
        self
    }

    /// Returns this snapshot stamped with a new provenance.
    #[must_use]
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    /// Returns the identity pair of this snapshot.
    #[must_use]
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.entity_type.clone(), self.entity_id.clone())
    }

    /// Returns true if `other` describes the same entity.
    #[must_use]
    pub fn same_entity<W>(&self, other: &Snapshot<W>) -> bool {
        self.entity_type == other.entity_type && self.entity_id == other.entity_id
    }

    /// Looks up a field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&V> {
        self.fields.get(field)
    }
}

impl Snapshot<FieldValue> {
    /// Builds a snapshot from a JSON object, one field per top-level key.
    ///
    /// Nested values become opaque composite fields.
    pub fn from_json(
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        data: serde_json::Value,
        provenance: Provenance,
    ) -> Result<Self> {
        let entity_type = entity_type.into();
        let entity_id = entity_id.into();
        let serde_json::Value::Object(map) = data else {
            return Err(Error::NotAnObject(format!("{entity_type}/{entity_id}")));
        };
        let fields = map
            .into_iter()
            .map(|(k, v)| (k, FieldValue::from(v)))
            .collect();
        Ok(Self {
            entity_type,
            entity_id,
            fields,
            provenance,
        })
    }

    /// Returns the fields as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::from(v.clone())))
                .collect(),
        )
    }
}
