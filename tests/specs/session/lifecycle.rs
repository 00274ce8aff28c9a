//! Session lifecycle specs: start, resume, status, checkpoint-now, breaker.

use crate::prelude::*;

#[test]
fn start_runs_the_default_plan_to_completion() {
    let project = Project::empty().with_default_plan();

    project
        .ddd()
        .args(&["start"])
        .passes()
        .stdout_has("completed");
}

#[test]
fn start_accepts_an_explicit_code_plan_path() {
    let project = Project::empty();
    project.file("plan.md", MINIMAL_PLAN);

    project
        .ddd()
        .args(&["start", "--code-plan", "plan.md"])
        .passes()
        .stdout_has("completed");
}

#[test]
fn resume_after_start_replays_to_completion_again() {
    let project = Project::empty().with_default_plan();
    project.ddd().args(&["start"]).passes();

    project
        .ddd()
        .args(&["resume"])
        .passes()
        .stdout_has("completed");
}

#[test]
fn status_with_no_prior_run_reports_idle() {
    let project = Project::empty();

    project
        .ddd()
        .args(&["status"])
        .passes()
        .stdout_has("Idle");
}

#[test]
fn status_json_format_is_valid_json() {
    let project = Project::empty();

    let run = project.ddd().args(&["status", "--format", "json"]).passes();
    let parsed: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert!(parsed.get("status").is_some());
}

#[test]
fn checkpoint_now_with_no_active_session_reports_nothing_written() {
    let project = Project::empty();

    project
        .ddd()
        .args(&["checkpoint-now"])
        .passes()
        .stdout_has("no active session");
}

#[test]
fn checkpoint_now_writes_an_emergency_checkpoint_for_an_active_session() {
    let project = Project::empty().with_default_plan();
    project.ddd().args(&["start"]).passes();

    project
        .ddd()
        .args(&["checkpoint-now"])
        .passes()
        .stdout_has("written");
}

#[test]
fn breaker_reset_succeeds_even_with_no_prior_state() {
    let project = Project::empty();

    project
        .ddd()
        .args(&["breaker", "reset"])
        .passes()
        .stdout_has("circuit breaker reset");
}

#[test]
fn logs_with_no_runs_yet_fails() {
    let project = Project::empty();

    project.ddd().args(&["logs"]).fails();
}
