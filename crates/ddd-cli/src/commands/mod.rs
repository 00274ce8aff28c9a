// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI subcommand implementations. Each collects its crate's typed errors
//! with `anyhow` at this boundary and renders through `crate::output`.

pub mod breaker;
pub mod checkpoint_now;
pub mod extract_worker;
pub mod logs;
pub mod resume;
pub mod start;
pub mod status;

use crate::config::Config;
use ddd_orchestrator::{OrchestratorError, Orchestrator};
use ddd_storage::{CheckpointStore, ImplStatusLog, ManifestStore};

pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

pub fn build_orchestrator(config: &Config) -> Orchestrator {
    let mut orchestrator = Orchestrator::new(
        ManifestStore::new(config.manifest_path()),
        CheckpointStore::new(config.checkpoints_dir()),
        ImplStatusLog::new(config.impl_status_path()),
        config.agents_dir(),
    );
    orchestrator.max_tokens = config.max_tokens;
    orchestrator
}

/// `0` success/handoff, `1` operator or validation error, `2` unhandled.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<OrchestratorError>() {
        Some(OrchestratorError::Validation(_))
        | Some(OrchestratorError::NoCheckpoint)
        | Some(OrchestratorError::Conflicts(_)) => 1,
        _ => 2,
    }
}

/// Best-effort checkpoint on an unhandled exception mid-run (§4.14, §6 exit
/// codes), tagged `interrupted` to distinguish it from a PreCompact-triggered
/// emergency checkpoint.
pub fn try_emergency_checkpoint(config: &Config) {
    let checkpoints = CheckpointStore::new(config.checkpoints_dir());
    let impl_status = ImplStatusLog::new(config.impl_status_path());
    let now = now_iso();
    if let Err(e) = ddd_orchestrator::emergency_checkpoint(&checkpoints, &impl_status, &now, "interrupted") {
        tracing::warn!(error = %e, "best-effort emergency checkpoint also failed");
    }
}
