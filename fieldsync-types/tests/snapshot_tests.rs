use fieldsync_types::{EntityRef, Error, FieldValue, OriginId, Provenance, Snapshot};
use pretty_assertions::assert_eq;
use serde_json::json;

fn prov() -> Provenance {
    Provenance::new(OriginId::new("dev").unwrap(), 1, 100)
}

#[test]
fn builder_sets_fields() {
    let snap: Snapshot = Snapshot::new("task", "1", prov())
        .with_field("title", "Buy milk")
        .with_field("done", false);
    assert_eq!(snap.get("title"), Some(&FieldValue::from("Buy milk")));
    assert_eq!(snap.get("done"), Some(&FieldValue::Bool(false)));
    assert_eq!(snap.get("missing"), None);
}

#[test]
fn builder_does_not_touch_original() {
    let a: Snapshot = Snapshot::new("task", "1", prov()).with_field("x", 1);
    let b = a.clone().with_field("x", 2).without_field("y");
    assert_eq!(a.get("x"), Some(&FieldValue::from(1)));
    assert_eq!(b.get("x"), Some(&FieldValue::from(2)));
}

#[test]
fn with_fields_and_without_field() {
    let snap: Snapshot<i64> = Snapshot::new("counter", "c", prov())
        .with_fields([("a", 1), ("b", 2)])
        .without_field("a");
    assert_eq!(snap.fields.keys().collect::<Vec<_>>(), vec!["b"]);
}

#[test]
fn entity_ref_and_same_entity() {
    let a: Snapshot = Snapshot::new("note", "n1", prov());
    let b: Snapshot = Snapshot::for_entity(&EntityRef::new("note", "n1"), prov());
    let c: Snapshot = Snapshot::new("note", "n2", prov());
    assert_eq!(a.entity_ref(), EntityRef::new("note", "n1"));
    assert!(a.same_entity(&b));
    assert!(!a.same_entity(&c));
}

#[test]
fn with_provenance_replaces_provenance() {
    let next = prov().next(200);
    let snap: Snapshot = Snapshot::new("note", "n1", prov()).with_provenance(next.clone());
    assert_eq!(snap.provenance, next);
}

#[test]
fn from_json_object() {
    let snap = Snapshot::from_json("note", "n1", json!({"title": "Hi", "meta": {"a": 1}}), prov())
        .unwrap();
    assert_eq!(snap.fields.len(), 2);
    assert!(snap.get("meta").unwrap().is_composite());
    assert_eq!(snap.to_json(), json!({"title": "Hi", "meta": {"a": 1}}));
}

#[test]
fn from_json_rejects_non_object() {
    let err = Snapshot::from_json("note", "n1", json!([1, 2]), prov()).unwrap_err();
    assert!(matches!(err, Error::NotAnObject(ref what) if what == "note/n1"));
}

#[test]
fn serialization_roundtrip() {
    let snap: Snapshot = Snapshot::new("task", "1", prov())
        .with_field("title", "Draft")
        .with_field("tags", FieldValue::Array(vec!["a".into()]));
    let json = serde_json::to_string(&snap).unwrap();
    let parsed: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, snap);
}
