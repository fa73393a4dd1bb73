use fieldsync_merge::{changed, same};
use fieldsync_types::FieldValue;
use std::collections::BTreeMap;

// ── same ─────────────────────────────────────────────────────────

#[test]
fn equal_scalars_are_same() {
    assert!(same(&FieldValue::from(1), &FieldValue::from(1)));
    assert!(same(&FieldValue::from("a"), &FieldValue::from("a")));
    assert!(same(&FieldValue::Null, &FieldValue::Null));
}

#[test]
fn different_scalars_are_not_same() {
    assert!(!same(&FieldValue::from(1), &FieldValue::from(2)));
    assert!(!same(&FieldValue::from("1"), &FieldValue::from(1)));
    assert!(!same(&FieldValue::Null, &FieldValue::Bool(false)));
}

#[test]
fn nan_is_same_as_nan() {
    let nan = FieldValue::Number(f64::NAN);
    assert!(same(&nan, &nan.clone()));
    assert!(same(&f64::NAN, &f64::NAN));
}

#[test]
fn nan_is_not_same_as_number() {
    assert!(!same(&FieldValue::Number(f64::NAN), &FieldValue::Number(0.0)));
}

#[test]
fn composites_compare_as_whole_values() {
    let a = FieldValue::Array(vec![1.into(), 2.into()]);
    let b = FieldValue::Array(vec![1.into(), 2.into()]);
    let c = FieldValue::Array(vec![2.into(), 1.into()]);
    assert!(same(&a, &b));
    assert!(!same(&a, &c));

    let mut m = BTreeMap::new();
    m.insert("k".to_string(), FieldValue::from("v"));
    assert!(same(&FieldValue::Object(m.clone()), &FieldValue::Object(m)));
}

#[test]
fn nan_inside_array_is_same() {
    let a = FieldValue::Array(vec![FieldValue::from(1), FieldValue::Number(f64::NAN)]);
    assert!(same(&a, &a.clone()));
}

#[test]
fn nan_inside_nested_object_is_same() {
    let mut inner = BTreeMap::new();
    inner.insert("x".to_string(), FieldValue::Number(f64::NAN));
    let mut outer = BTreeMap::new();
    outer.insert("inner".to_string(), FieldValue::Object(inner));
    outer.insert("list".to_string(), FieldValue::Array(vec![FieldValue::Number(f64::NAN)]));
    let a = FieldValue::Object(outer);
    assert!(same(&a, &a.clone()));
}

#[test]
fn nan_inside_composite_still_differs_from_number() {
    let a = FieldValue::Array(vec![FieldValue::Number(f64::NAN)]);
    let b = FieldValue::Array(vec![FieldValue::Number(0.0)]);
    assert!(!same(&a, &b));
    let longer = FieldValue::Array(vec![FieldValue::Number(f64::NAN), FieldValue::Null]);
    assert!(!same(&a, &longer));
}

// ── changed ──────────────────────────────────────────────────────

#[test]
fn absent_vs_absent_is_unchanged() {
    assert!(!changed::<FieldValue>(None, None));
}

#[test]
fn absent_vs_present_is_changed() {
    let v = FieldValue::from(1);
    assert!(changed(None, Some(&v)));
    assert!(changed(Some(&v), None));
}

#[test]
fn changed_is_negation_of_same() {
    let a = FieldValue::from(1);
    let b = FieldValue::from(2);
    assert!(!changed(Some(&a), Some(&a)));
    assert!(changed(Some(&a), Some(&b)));
    let nan = FieldValue::Number(f64::NAN);
    assert!(!changed(Some(&nan), Some(&nan)));
}

#[test]
fn works_for_plain_values() {
    assert!(changed(Some(&1_i64), Some(&2_i64)));
    assert!(!changed(Some(&"x".to_string()), Some(&"x".to_string())));
}
