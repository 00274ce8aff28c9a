//! CLI error handling specs
//!
//! Verify exit codes and error messages for invalid invocations.

use crate::prelude::*;

#[test]
fn start_with_missing_plan_fails_with_exit_code_two() {
    let project = Project::empty();

    // A missing/unparsable plan surfaces as OrchestratorError::Plan, which
    // is not one of the operator-error variants, so it exits 2.
    let result = project
        .ddd()
        .args(&["start", "--code-plan", "missing.md"])
        .fails();
    assert_eq!(result.code(), Some(2));
}

#[test]
fn resume_without_a_checkpoint_fails_with_exit_code_one() {
    let project = Project::empty().with_default_plan();

    let result = project.ddd().args(&["resume"]).fails();
    assert_eq!(result.code(), Some(1));
}

#[test]
fn unknown_subcommand_shows_usage_error() {
    let project = Project::empty();
    project
        .ddd()
        .args(&["frobnicate"])
        .fails()
        .stderr_has("unrecognized subcommand");
}
