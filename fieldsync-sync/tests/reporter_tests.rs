use fieldsync_merge::{merge, Side, Winner};
use fieldsync_sync::{AuditEntry, CollectingReporter, ConflictReporter, TracingReporter};
use fieldsync_types::{FieldValue, OriginId, Provenance, Snapshot};
use pretty_assertions::assert_eq;

fn prov(origin: &str, version: u64, updated_at: u64) -> Provenance {
    Provenance::new(OriginId::new(origin).unwrap(), version, updated_at)
}

fn conflicting_merge() -> fieldsync_merge::MergeResult {
    let base: Snapshot = Snapshot::new("task", "1", prov("b", 1, 10)).with_field("title", "Draft");
    let local = base.clone().with_field("title", "Mine").with_provenance(prov("l", 1, 20));
    let remote = base.clone().with_field("title", "Theirs").with_provenance(prov("r", 1, 30));
    merge(Some(&base), &local, &remote).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("fieldsync_sync=info,fieldsync_merge=debug")
        .with_test_writer()
        .try_init();
}

#[test]
fn tracing_reporter_handles_conflicts() {
    init_tracing();
    let result = conflicting_merge();
    TracingReporter.report(&result.merged.entity_ref(), &result);
}

#[test]
fn collecting_reporter_records_conflicts() {
    let reporter = CollectingReporter::<FieldValue>::new();
    let result = conflicting_merge();
    reporter.report(&result.merged.entity_ref(), &result);

    let entries = reporter.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].winner, Winner::Remote);
    assert_eq!(entries[0].conflicts[0].winner, Side::Remote);
    assert_eq!(entries[0].conflicts[0].local_value, Some(FieldValue::from("Mine")));
    assert_eq!(reporter.conflict_count(), 1);
}

#[test]
fn collecting_reporter_skips_clean_merges() {
    let reporter = CollectingReporter::<FieldValue>::default();
    let base: Snapshot = Snapshot::new("task", "1", prov("b", 1, 10)).with_field("title", "Draft");
    let result = merge(Some(&base), &base, &base).unwrap();
    reporter.report(&result.merged.entity_ref(), &result);
    assert!(reporter.entries().is_empty());
}

#[test]
fn audit_entries_serialize() {
    let reporter = CollectingReporter::<FieldValue>::new();
    let result = conflicting_merge();
    reporter.report(&result.merged.entity_ref(), &result);

    let json = serde_json::to_value(reporter.entries()).unwrap();
    assert_eq!(json[0]["entity"]["entity_type"], "task");
    assert_eq!(json[0]["conflicts"][0]["resolved_value"], "Theirs");

    let parsed: Vec<AuditEntry<FieldValue>> = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, reporter.entries());
}
