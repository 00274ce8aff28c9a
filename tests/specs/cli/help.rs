//! CLI help output specs
//!
//! Verify help text displays for all subcommands.

use crate::prelude::*;

#[test]
fn ddd_help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:");
}

#[test]
fn ddd_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("ddd");
}

#[test]
fn ddd_no_args_shows_usage_and_exits_nonzero() {
    cli().fails().stderr_has("Usage:");
}

#[test]
fn ddd_start_help_shows_code_plan_flag() {
    cli()
        .args(&["start", "--help"])
        .passes()
        .stdout_has("--code-plan");
}

#[test]
fn ddd_status_help_shows_format_and_watch_flags() {
    cli()
        .args(&["status", "--help"])
        .passes()
        .stdout_has("--format")
        .stdout_has("--watch");
}

#[test]
fn ddd_breaker_help_shows_reset_subcommand() {
    cli()
        .args(&["breaker", "--help"])
        .passes()
        .stdout_has("reset");
}

#[test]
fn ddd_logs_help_shows_follow_and_run_flags() {
    cli()
        .args(&["logs", "--help"])
        .passes()
        .stdout_has("--follow")
        .stdout_has("--run");
}

#[test]
fn ddd_extract_worker_subcommand_is_hidden() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_lacks("__extract-worker");
}
