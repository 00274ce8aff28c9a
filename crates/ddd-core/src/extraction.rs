// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Extraction worker state (§3 ExtractionState).

use serde::{Deserialize, Serialize};

/// Overall status of an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Completed,
    CompletedWithErrors,
    Cancelled,
}

/// Status of a single transcript within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

/// Per-transcript progress within an extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptState {
    pub id: String,
    pub status: TranscriptStatus,
    #[serde(default)]
    pub memories: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl TranscriptState {
    pub fn pending(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: TranscriptStatus::Pending,
            memories: 0,
            completed_at: None,
        }
    }
}

/// Full state of one extraction worker run, persisted to
/// `.data/memories/.extraction_state.json`.
///
/// Invariant: `pid.is_some()` implies `status == Running`; a terminal
/// `status` implies `pid.is_none()`. `new_running` / the worker's own
/// terminal transitions are the only places that should construct or
/// mutate this so the invariant holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionState {
    pub status: RunStatus,
    pub started_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    #[serde(default)]
    pub transcripts: Vec<TranscriptState>,
    pub last_update: String,
}

impl ExtractionState {
    /// Construct the initial state for a freshly started worker run.
    pub fn new_running(pid: u32, started_at: String, transcripts: Vec<TranscriptState>) -> Self {
        Self {
            status: RunStatus::Running,
            started_at: started_at.clone(),
            pid: Some(pid),
            transcripts,
            last_update: started_at,
        }
    }

    /// Transition to a terminal status, clearing the PID (invariant).
    pub fn finish(&mut self, status: RunStatus, at: String) {
        debug_assert!(!matches!(status, RunStatus::Running));
        self.status = status;
        self.pid = None;
        self.last_update = at;
    }

    pub fn completed_count(&self) -> usize {
        self.transcripts
            .iter()
            .filter(|t| t.status == TranscriptStatus::Completed)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.transcripts
            .iter()
            .filter(|t| t.status == TranscriptStatus::Failed)
            .count()
    }

    pub fn total_memories(&self) -> u32 {
        self.transcripts.iter().map(|t| t.memories).sum()
    }
}

#[cfg(test)]
#[path = "extraction_tests.rs"]
mod tests;
