use super::*;
use std::path::PathBuf;
use tempfile::tempdir;

fn record(id: &str) -> TranscriptRecord {
    TranscriptRecord::new(
        SessionId::new(id),
        PathBuf::from(format!("/tmp/session_{id}.jsonl")),
        "2026-01-01T00:00:00Z".into(),
    )
}

#[test]
fn add_is_idempotent() {
    let dir = tempdir().unwrap();
    let registry = TranscriptRegistry::new(dir.path().join("transcripts.json"));
    registry.add(record("a")).unwrap();
    registry.add(record("a")).unwrap();
    assert_eq!(registry.all().unwrap().len(), 1);
}

#[test]
fn unprocessed_excludes_processed_records() {
    let dir = tempdir().unwrap();
    let registry = TranscriptRegistry::new(dir.path().join("transcripts.json"));
    registry.add(record("a")).unwrap();
    registry.add(record("b")).unwrap();
    registry
        .mark_processed(&SessionId::new("a"), 2, "2026-01-01T01:00:00Z".into())
        .unwrap();

    let unprocessed = registry.unprocessed().unwrap();
    assert_eq!(unprocessed.len(), 1);
    assert_eq!(unprocessed[0].session_id, SessionId::new("b"));
}

#[test]
fn mark_processed_sets_memory_count() {
    let dir = tempdir().unwrap();
    let registry = TranscriptRegistry::new(dir.path().join("transcripts.json"));
    registry.add(record("a")).unwrap();
    registry
        .mark_processed(&SessionId::new("a"), 5, "2026-01-01T01:00:00Z".into())
        .unwrap();

    let all = registry.all().unwrap();
    assert!(all[0].processed);
    assert_eq!(all[0].memories_extracted, 5);
    assert_eq!(all[0].processed_at.as_deref(), Some("2026-01-01T01:00:00Z"));
}

#[test]
fn mark_processed_unknown_session_is_a_no_op() {
    let dir = tempdir().unwrap();
    let registry = TranscriptRegistry::new(dir.path().join("transcripts.json"));
    registry
        .mark_processed(&SessionId::new("ghost"), 1, "t".into())
        .unwrap();
    assert!(registry.all().unwrap().is_empty());
}

#[test]
fn unprocessed_preserves_registration_order() {
    let dir = tempdir().unwrap();
    let registry = TranscriptRegistry::new(dir.path().join("transcripts.json"));
    for id in ["a", "b", "c"] {
        registry.add(record(id)).unwrap();
    }
    let ids: Vec<String> = registry
        .unprocessed()
        .unwrap()
        .into_iter()
        .map(|r| r.session_id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}
