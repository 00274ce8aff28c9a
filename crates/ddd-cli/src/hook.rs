// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The hook wrapper (§6): the host's hook dispatcher is itself an external
//! collaborator (§1), but this binary owns the thin adapter it calls into —
//! read one JSON document from stdin, dispatch on `hook_event_name`, write
//! one JSON document to stdout. Defensively silent on anything unexpected:
//! the host's hook chain must never break because of this process.
//!
//! No component in this system computes contradiction warnings, so this
//! wrapper only ever emits `{}` (no action) or the session-end
//! `{success, message, extraction_started}` shape — never the
//! `{warning, metadata}` document the wire contract also allows for.

use crate::config::Config;
use crate::worker_process;
use chrono::Utc;
use ddd_core::{SessionId, TranscriptRecord};
use ddd_storage::{CircuitStore, ExtractionQueue, ExtractionStateStore, ImplStatusLog, TranscriptRegistry};
use ddd_watchdog::{route, CircuitBreaker, RouteDecision, Supervisor};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
struct HookInput {
    #[serde(default)]
    hook_event_name: String,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    transcript_path: Option<PathBuf>,
    #[serde(default)]
    tool_name: Option<String>,
    #[serde(default)]
    parameters: Option<Value>,
}

#[derive(Debug, Serialize)]
struct SessionEndOutcome {
    success: bool,
    message: String,
    extraction_started: bool,
}

fn no_action() -> Value {
    json!({})
}

/// Entry point for the `ddd hook` subcommand: read stdin, dispatch, write
/// stdout. Never returns an error to the caller — failures are logged and
/// degrade to `{}` per the wire contract's "defensively silent" policy.
pub fn run(config: &Config, stdin: &str) -> Value {
    if !config.memory_system_enabled {
        return no_action();
    }

    let input: HookInput = match serde_json::from_str(stdin) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "malformed hook input, ignoring");
            return no_action();
        }
    };

    match input.hook_event_name.as_str() {
        "Stop" => handle_session_end(config, &input),
        "SubagentStop" => no_action(),
        "PostToolUse" => {
            handle_post_tool_use(config, &input);
            no_action()
        }
        "PreCompact" => {
            handle_pre_compact(config);
            no_action()
        }
        _ => no_action(),
    }
}

/// `handle_session_end(session_id, transcript_path)` (§6): register the
/// transcript, route the `Stop` event through the breaker, and start the
/// worker if nothing is already running.
fn handle_session_end(config: &Config, input: &HookInput) -> Value {
    let (Some(session_id), Some(transcript_path)) = (&input.session_id, &input.transcript_path) else {
        return no_action();
    };
    let now_iso = Utc::now().to_rfc3339();
    let now_unix = Utc::now().timestamp() as u64;

    let registry = TranscriptRegistry::new(config.transcripts_path());
    if let Err(e) = registry.add(TranscriptRecord::new(
        SessionId::new(session_id.as_str()),
        transcript_path.clone(),
        now_iso.clone(),
    )) {
        tracing::warn!(error = %e, "failed to register transcript");
        return no_action();
    }

    let breaker = CircuitBreaker::new(CircuitStore::new(config.circuit_state_path()));
    let decision = match route("Stop", &breaker, now_unix) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(error = %e, "router failed");
            return no_action();
        }
    };

    let message = match decision {
        RouteDecision::Skip { reason } => {
            return serde_json::to_value(SessionEndOutcome {
                success: true,
                message: reason,
                extraction_started: false,
            })
            .unwrap_or_else(|_| no_action());
        }
        RouteDecision::Queue => {
            let queue = ExtractionQueue::new(config.extraction_queue_path());
            if let Err(e) = queue.enqueue(&ddd_core::QueuedExtraction::new(
                SessionId::new(session_id.as_str()),
                transcript_path.clone(),
                now_iso.clone(),
                "Stop".to_string(),
            )) {
                tracing::warn!(error = %e, "failed to enqueue extraction");
            }
            "queued for extraction".to_string()
        }
    };

    let extraction_started = start_worker_if_idle(config, &now_iso).unwrap_or(false);

    serde_json::to_value(SessionEndOutcome {
        success: true,
        message,
        extraction_started,
    })
    .unwrap_or_else(|_| no_action())
}

fn start_worker_if_idle(config: &Config, now_iso: &str) -> Result<bool, ddd_watchdog::WatchdogError> {
    let registry = TranscriptRegistry::new(config.transcripts_path());
    let has_unprocessed = !registry.unprocessed().unwrap_or_default().is_empty();

    let state_store = ExtractionStateStore::new(config.extraction_state_path());
    let supervisor = Supervisor::new(&state_store);
    let log_path = ddd_watchdog::log_path(&config.memories_dir(), now_iso);
    let config = config.clone();
    supervisor.start(has_unprocessed, || now_iso.to_string(), move || {
        worker_process::spawn(&config, &log_path)
    })
}

/// PostToolUse edit tracking (§4.14): append a `[MODIFIED]` line while a
/// DDD session is active, as reported by the impl-status log.
fn handle_post_tool_use(config: &Config, input: &HookInput) {
    let impl_status = ImplStatusLog::new(config.impl_status_path());
    let Ok(true) = impl_status.is_active() else {
        return;
    };
    let Some(path) = input
        .parameters
        .as_ref()
        .and_then(|p| p.get("file_path").or_else(|| p.get("path")))
        .and_then(Value::as_str)
    else {
        return;
    };
    let now_iso = Utc::now().to_rfc3339();
    if let Err(e) = impl_status.append_modified(std::path::Path::new(path), &now_iso) {
        tracing::warn!(error = %e, "failed to record modified file");
    }
}

/// PreCompact (§4.14): write an emergency checkpoint ahead of the host
/// compacting context. Never surfaces an error — compaction proceeds
/// regardless (`emergency_checkpoint`'s own contract).
fn handle_pre_compact(config: &Config) {
    let checkpoints = ddd_storage::CheckpointStore::new(config.checkpoints_dir());
    let impl_status = ImplStatusLog::new(config.impl_status_path());
    let now_iso = Utc::now().to_rfc3339();
    if let Err(e) = ddd_orchestrator::emergency_checkpoint(&checkpoints, &impl_status, &now_iso, "pre_compact") {
        tracing::warn!(error = %e, "emergency checkpoint failed");
    }
}

#[cfg(test)]
#[path = "hook_tests.rs"]
mod tests;
