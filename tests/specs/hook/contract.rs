//! Hook wrapper stdin/stdout contract specs.
//!
//! The host invokes `ddd hook` once per event, feeding a JSON document on
//! stdin and reading exactly one JSON document back from stdout.

use crate::prelude::*;

fn enabled(project: &Project) -> CliBuilder {
    project.ddd().env("MEMORY_SYSTEM_ENABLED", "true")
}

#[test]
fn disabled_memory_system_emits_no_action() {
    let project = Project::empty();

    let run = project
        .ddd()
        .args(&["hook"])
        .stdin(r#"{"hook_event_name":"Stop"}"#)
        .passes();
    let parsed: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(parsed, serde_json::json!({}));
}

#[test]
fn malformed_stdin_emits_no_action() {
    let project = Project::empty();

    let run = enabled(&project)
        .args(&["hook"])
        .stdin("not json at all")
        .passes();
    let parsed: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(parsed, serde_json::json!({}));
}

#[test]
fn unknown_event_emits_no_action() {
    let project = Project::empty();

    let run = enabled(&project)
        .args(&["hook"])
        .stdin(r#"{"hook_event_name":"SomeOtherEvent"}"#)
        .passes();
    let parsed: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(parsed, serde_json::json!({}));
}

#[test]
fn subagent_stop_is_always_a_no_op() {
    let project = Project::empty();

    let run = enabled(&project)
        .args(&["hook"])
        .stdin(r#"{"hook_event_name":"SubagentStop"}"#)
        .passes();
    let parsed: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(parsed, serde_json::json!({}));
}

#[test]
fn stop_without_session_id_or_transcript_is_a_no_op() {
    let project = Project::empty();

    let run = enabled(&project)
        .args(&["hook"])
        .stdin(r#"{"hook_event_name":"Stop"}"#)
        .passes();
    let parsed: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(parsed, serde_json::json!({}));
}

#[test]
fn stop_with_session_and_transcript_emits_the_session_end_shape() {
    let project = Project::empty();
    project.file("transcript.jsonl", "{}");

    let input = serde_json::json!({
        "hook_event_name": "Stop",
        "session_id": "sess-abc12345",
        "transcript_path": project.path().join("transcript.jsonl").to_string_lossy(),
    });

    let run = enabled(&project)
        .args(&["hook"])
        .stdin(input.to_string())
        .passes();
    let parsed: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert!(parsed.get("success").is_some());
    assert!(parsed.get("message").is_some());
    assert!(parsed.get("extraction_started").is_some());
    // The wire contract also allows a {warning, metadata} contradiction
    // shape, but no component in this system computes one.
    assert!(parsed.get("warning").is_none());
    assert!(parsed.get("metadata").is_none());
}

#[test]
fn pre_compact_is_harmless_with_no_prior_session() {
    let project = Project::empty();

    let run = enabled(&project)
        .args(&["hook"])
        .stdin(r#"{"hook_event_name":"PreCompact"}"#)
        .passes();
    let parsed: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(parsed, serde_json::json!({}));
}

#[test]
fn post_tool_use_is_a_no_op_without_an_active_session() {
    let project = Project::empty();

    let input = serde_json::json!({
        "hook_event_name": "PostToolUse",
        "parameters": { "file_path": "src/lib.rs" },
    });

    let run = enabled(&project)
        .args(&["hook"])
        .stdin(input.to_string())
        .passes();
    let parsed: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(parsed, serde_json::json!({}));
}
