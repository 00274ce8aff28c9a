// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Extraction worker (§4.7): the detached child process that walks the
//! registry's unprocessed transcripts sequentially, isolating per-transcript
//! failure so one bad transcript never aborts the run.

use ddd_core::{ExtractionState, RunStatus, TranscriptState, TranscriptStatus};
use ddd_extract::{process, LlmClient, MemoryStore};
use ddd_storage::{ExtractionStateStore, TranscriptRegistry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Final statistics the worker prints as a single-line stdout marker so the
/// watchdog can capture them without parsing worker logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerStats {
    pub transcripts_total: usize,
    pub transcripts_completed: usize,
    pub errors: usize,
    pub memories_extracted: u32,
}

pub const STATS_MARKER_PREFIX: &str = "WORKER_STATS: ";

impl WorkerStats {
    pub fn render_marker(&self) -> String {
        format!(
            "{STATS_MARKER_PREFIX}{}",
            serde_json::to_string(self).unwrap_or_default()
        )
    }
}

pub struct Worker<'a> {
    pub registry: &'a TranscriptRegistry,
    pub state_store: &'a ExtractionStateStore,
    pub client: &'a dyn LlmClient,
    pub store: &'a dyn MemoryStore,
}

impl<'a> Worker<'a> {
    /// Run one extraction pass over every currently-unprocessed transcript.
    /// `now` and `pid` are caller-supplied so the worker stays deterministic
    /// and testable; `cancelled` is polled between transcripts (§5
    /// cooperative cancellation).
    pub async fn run(
        &self,
        pid: u32,
        now: impl Fn() -> String,
        cancelled: impl Fn() -> bool,
    ) -> Result<WorkerStats, ddd_storage::StoreError> {
        let transcripts = self.registry.unprocessed()?;
        if transcripts.is_empty() {
            return Ok(WorkerStats {
                transcripts_total: 0,
                transcripts_completed: 0,
                errors: 0,
                memories_extracted: 0,
            });
        }

        let started_at = now();
        let mut state = ExtractionState::new_running(
            pid,
            started_at.clone(),
            transcripts
                .iter()
                .map(|t| TranscriptState::pending(t.session_id.as_str()))
                .collect(),
        );
        self.state_store.save(&state)?;

        let mut completed = 0usize;
        let mut errors = 0usize;
        let mut memories_extracted = 0u32;

        for record in &transcripts {
            if cancelled() {
                break;
            }

            if let Some(entry) = state
                .transcripts
                .iter_mut()
                .find(|t| t.id == record.session_id.as_str())
            {
                entry.status = TranscriptStatus::InProgress;
            }
            self.state_store.save(&state)?;

            let outcome = process(&record.transcript_path, self.client, self.store).await;
            let at = now();

            let (status, memories) = match outcome {
                Ok(result) if result.success => {
                    self.registry
                        .mark_processed(&record.session_id, result.memories_extracted, at.clone())?;
                    completed += 1;
                    memories_extracted += result.memories_extracted;
                    (TranscriptStatus::Completed, result.memories_extracted)
                }
                Ok(result) => {
                    tracing::warn!(session_id = %record.session_id, error = ?result.error, "transcript extraction failed");
                    errors += 1;
                    (TranscriptStatus::Failed, 0)
                }
                Err(e) => {
                    tracing::warn!(session_id = %record.session_id, error = %e, "transcript processing error");
                    errors += 1;
                    (TranscriptStatus::Failed, 0)
                }
            };

            if let Some(entry) = state
                .transcripts
                .iter_mut()
                .find(|t| t.id == record.session_id.as_str())
            {
                entry.status = status;
                entry.memories = memories;
                entry.completed_at = Some(at);
            }
            self.state_store.save(&state)?;
        }

        let final_status = if errors == 0 {
            RunStatus::Completed
        } else {
            RunStatus::CompletedWithErrors
        };
        state.finish(final_status, now());
        self.state_store.save(&state)?;

        Ok(WorkerStats {
            transcripts_total: transcripts.len(),
            transcripts_completed: completed,
            errors,
            memories_extracted,
        })
    }
}

/// Per-run rolling log path under `.data/memories/logs/` (§1a).
pub fn log_path(memories_dir: &std::path::Path, timestamp: &str) -> PathBuf {
    memories_dir.join("logs").join(format!("extraction_{timestamp}.log"))
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
