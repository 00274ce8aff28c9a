// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::config::Config;
use crate::output::{self, OutputFormat};
use ddd_storage::ExtractionStateStore;
use ddd_watchdog::{Progress, Stage, StatusReport, Supervisor, Terminal, WorkerStatus};
use std::time::Duration;

const WATCH_INTERVAL: Duration = Duration::from_millis(500);

fn human(report: &StatusReport) -> String {
    format!(
        "status: {:?} transcripts: {}/{} memories: {}{}",
        report.status,
        report.transcripts_completed,
        report.transcripts_total,
        report.memories_extracted,
        report
            .pid
            .map(|pid| format!(" pid: {pid}"))
            .unwrap_or_default(),
    )
}

fn is_terminal(status: WorkerStatus) -> bool {
    matches!(
        status,
        WorkerStatus::Idle | WorkerStatus::Completed | WorkerStatus::Failed | WorkerStatus::Crashed
    )
}

pub fn run(config: &Config, format: OutputFormat, watch: bool) -> anyhow::Result<()> {
    let state_store = ExtractionStateStore::new(config.extraction_state_path());
    let supervisor = Supervisor::new(&state_store);

    if !watch {
        let report = supervisor.status()?;
        output::render(format, &report, human);
        return Ok(());
    }

    let mut terminal = Terminal::new(std::io::stdout());
    let mut stop = false;
    output::watch(WATCH_INTERVAL, || {
        if stop {
            return false;
        }
        let report = match supervisor.status() {
            Ok(r) => r,
            Err(_) => return false,
        };
        terminal.update(&Progress {
            transcripts_total: report.transcripts_total,
            transcripts_completed: report.transcripts_completed,
            current_session: report
                .pid
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            stage: Stage::Extraction,
            stage_progress: report.transcripts_completed,
            stage_total: report.transcripts_total,
        });
        if is_terminal(report.status) {
            terminal.show_summary(
                report.transcripts_total,
                report.memories_extracted,
                Duration::from_secs(0),
            );
            stop = true;
        }
        !stop
    });
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
