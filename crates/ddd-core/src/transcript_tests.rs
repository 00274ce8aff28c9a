use super::*;
use std::path::Path;

#[test]
fn new_record_is_unprocessed() {
    let r = TranscriptRecord::new(
        SessionId::new("abc"),
        PathBuf::from("/tmp/session_abc.jsonl"),
        "2026-01-01T00:00:00Z".into(),
    );
    assert!(!r.processed);
    assert!(r.processed_at.is_none());
    assert_eq!(r.memories_extracted, 0);
}

#[test]
fn mark_processed_sets_all_fields() {
    let mut r = TranscriptRecord::new(
        SessionId::new("abc"),
        PathBuf::from("/tmp/session_abc.jsonl"),
        "2026-01-01T00:00:00Z".into(),
    );
    r.mark_processed(3, "2026-01-01T00:05:00Z".into());
    assert!(r.processed);
    assert_eq!(r.memories_extracted, 3);
    assert_eq!(r.processed_at.as_deref(), Some("2026-01-01T00:05:00Z"));
}

#[test]
fn session_id_strips_prefix_and_extension() {
    let id = session_id_from_filename(Path::new("/data/session_abc123.jsonl"));
    assert_eq!(id.as_str(), "abc123");
}

#[test]
fn session_id_without_prefix_passes_through() {
    let id = session_id_from_filename(Path::new("/data/abc123.jsonl"));
    assert_eq!(id.as_str(), "abc123");
}

#[test]
fn queued_extraction_starts_with_zero_retries() {
    let q = QueuedExtraction::new(
        SessionId::new("abc"),
        PathBuf::from("/tmp/session_abc.jsonl"),
        "2026-01-01T00:00:00Z".into(),
        "PostToolUse".into(),
    );
    assert_eq!(q.retries, 0);
    assert!(q.last_error.is_none());
}

#[test]
fn record_failure_increments_retries_and_sets_error() {
    let mut q = QueuedExtraction::new(
        SessionId::new("abc"),
        PathBuf::from("/tmp/session_abc.jsonl"),
        "2026-01-01T00:00:00Z".into(),
        "PostToolUse".into(),
    );
    q.record_failure("timeout".into());
    q.record_failure("timeout".into());
    assert_eq!(q.retries, 2);
    assert_eq!(q.last_error.as_deref(), Some("timeout"));
}
