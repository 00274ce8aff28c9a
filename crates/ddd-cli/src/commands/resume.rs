// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::config::Config;
use ddd_orchestrator::RunOutcome;

pub async fn run(config: &Config) -> anyhow::Result<()> {
    let orchestrator = super::build_orchestrator(config);

    let mut state = orchestrator
        .resume(config.repo_root())
        .await
        .map_err(|e| {
            super::try_emergency_checkpoint(config);
            e
        })?;

    let chunks = ddd_plan::parse(&config.default_plan_path())?;
    let now = super::now_iso();

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
#[path = "resume_tests.rs"]
mod tests;
