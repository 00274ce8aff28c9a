// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::config::Config;
use crate::output::{self, OutputFormat};
use ddd_storage::{CheckpointStore, ImplStatusLog};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CheckpointSummary {
    written: bool,
    checkpoint_id: Option<String>,
}

pub fn run(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let checkpoints = CheckpointStore::new(config.checkpoints_dir());
    let impl_status = ImplStatusLog::new(config.impl_status_path());
    let now = super::now_iso();

    ddd_orchestrator::emergency_checkpoint(&checkpoints, &impl_status, &now, "manual")?;
    let latest = checkpoints.latest()?;

    let summary = CheckpointSummary {
        written: latest.is_some(),
        checkpoint_id: latest.map(|c| c.checkpoint_id),
    };
    output::render(format, &summary, |s| match &s.checkpoint_id {
        Some(id) => format!("checkpoint {id} written"),
        None => "no active session to checkpoint".to_string(),
    });
    Ok(())
}

#[cfg(test)]
#[path = "checkpoint_now_tests.rs"]
mod tests;
