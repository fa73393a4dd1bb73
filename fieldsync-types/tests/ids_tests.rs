use fieldsync_types::{EntityRef, Error, OriginId};
use std::collections::HashSet;
use std::str::FromStr;

// ── OriginId ─────────────────────────────────────────────────────

#[test]
fn origin_id_new_keeps_text() {
    let id = OriginId::new("laptop-1").unwrap();
    assert_eq!(id.as_str(), "laptop-1");
    assert_eq!(id.to_string(), "laptop-1");
}

#[test]
fn origin_id_rejects_empty() {
    assert!(matches!(OriginId::new(""), Err(Error::EmptyOriginId)));
    assert!(OriginId::from_str("").is_err());
}

#[test]
fn origin_id_generate_is_unique() {
    let a = OriginId::generate();
    let b = OriginId::generate();
    assert_ne!(a, b);
    assert!(uuid::Uuid::parse_str(a.as_str()).is_ok());
}

#[test]
fn origin_id_orders_lexicographically() {
    let a = OriginId::new("alpha").unwrap();
    let b = OriginId::new("beta").unwrap();
    let upper = OriginId::new("Zulu").unwrap();
    assert!(a < b);
    // Byte order: uppercase sorts before lowercase.
    assert!(upper < a);
}

#[test]
fn origin_id_orders_by_code_point() {
    let astral = OriginId::new("\u{10000}").unwrap();
    let private_use = OriginId::new("\u{FFFF}").unwrap();
    assert!(private_use < astral);
}

#[test]
fn origin_id_hash_and_eq() {
    let id = OriginId::new("phone").unwrap();
    let mut set = HashSet::new();
    set.insert(id.clone());
    set.insert(id);
    assert_eq!(set.len(), 1);
}

#[test]
fn origin_id_serializes_as_plain_string() {
    let id = OriginId::new("tablet").unwrap();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"tablet\"");
    let parsed: OriginId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn origin_id_deserialize_rejects_empty() {
    let parsed: Result<OriginId, _> = serde_json::from_str("\"\"");
    assert!(parsed.is_err());
}

// ── EntityRef ────────────────────────────────────────────────────

#[test]
fn entity_ref_display() {
    let r = EntityRef::new("task", "42");
    assert_eq!(r.to_string(), "task/42");
}

#[test]
fn entity_ref_equality_needs_both_parts() {
    assert_eq!(EntityRef::new("task", "1"), EntityRef::new("task", "1"));
    assert_ne!(EntityRef::new("task", "1"), EntityRef::new("note", "1"));
    assert_ne!(EntityRef::new("task", "1"), EntityRef::new("task", "2"));
}
