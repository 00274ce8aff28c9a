// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::config::Config;
use ddd_orchestrator::RunOutcome;
use std::path::PathBuf;

pub fn run(config: &Config, code_plan: Option<PathBuf>) -> anyhow::Result<()> {
    let plan_path = code_plan.unwrap_or_else(|| config.default_plan_path());
    let orchestrator = super::build_orchestrator(config);
    let now = super::now_iso();

    let (mut state, chunks) = orchestrator.start(&plan_path, &now).map_err(|e| {
        super::try_emergency_checkpoint(config);
        e
    })?;

    let outcome = orchestrator.run(&chunks, &mut state, &now).map_err(|e| {
        super::try_emergency_checkpoint(config);
        e
    })?;

    match outcome {
        RunOutcome::Completed => println!("session {} completed", state.session_id),
        RunOutcome::HandedOff { reason } => {
            println!("session {} handed off: {reason}", state.session_id)
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "start_tests.rs"]
mod tests;
