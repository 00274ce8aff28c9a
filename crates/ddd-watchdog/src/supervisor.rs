// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watchdog / supervisor (§4.8): starts, stops, and reports on the
//! extraction worker process. Liveness uses signal-zero semantics, the same
//! `kill -0` / `kill -15` / `kill -9` discipline production daemons here use
//! for PID tracking.

use crate::error::WatchdogError;
use ddd_core::RunStatus;
use ddd_storage::ExtractionStateStore;
use serde::{Deserialize, Serialize};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

const START_GRACE: Duration = Duration::from_millis(500);
const STOP_POLL_TIMEOUT: Duration = Duration::from_secs(5);
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Idle,
    Running,
    Completed,
    Failed,
    Crashed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: WorkerStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    pub transcripts_total: usize,
    pub transcripts_completed: usize,
    pub memories_extracted: u32,
}

fn kill_signal(signal: &str, pid: u32) -> bool {
    Command::new("kill")
        .args([signal, &pid.to_string()])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Liveness by signal-zero: alive if the no-op signal succeeds or is denied
/// (the process exists but we lack permission), dead only if the OS reports
/// no such process.
pub fn process_exists(pid: u32) -> bool {
    kill_signal("-0", pid)
}

pub struct Supervisor<'a> {
    state_store: &'a ExtractionStateStore,
}

impl<'a> Supervisor<'a> {
    pub fn new(state_store: &'a ExtractionStateStore) -> Self {
        Self { state_store }
    }

    /// Refuse with `false` if another worker is live or there is nothing to
    /// do; otherwise persist an initial state, spawn, and verify the child
    /// survived the startup grace window.
    pub fn start(
        &self,
        has_unprocessed: bool,
        now: impl Fn() -> String,
        spawn: impl FnOnce() -> std::io::Result<std::process::Child>,
    ) -> Result<bool, WatchdogError> {
        if let Some(state) = self.state_store.load()? {
            if state.status == RunStatus::Running {
                if let Some(pid) = state.pid {
                    if process_exists(pid) {
                        return Ok(false);
                    }
                }
            }
        }

        if !has_unprocessed {
            return Ok(false);
        }

        let started_at = now();
        let placeholder = ddd_core::ExtractionState {
            status: RunStatus::Running,
            started_at: started_at.clone(),
            pid: None,
            transcripts: vec![],
            last_update: started_at.clone(),
        };
        self.state_store.save(&placeholder)?;

        let child = spawn()?;
        let pid = child.id();

        std::thread::sleep(START_GRACE);
        if !process_exists(pid) {
            return Err(WatchdogError::WorkerDiedImmediately);
        }

        let running = ddd_core::ExtractionState::new_running(pid, started_at, vec![]);
        self.state_store.save(&running)?;
        Ok(true)
    }

    pub fn status(&self) -> Result<StatusReport, WatchdogError> {
        let Some(state) = self.state_store.load()? else {
            return Ok(StatusReport {
                status: WorkerStatus::Idle,
                pid: None,
                started_at: None,
                transcripts_total: 0,
                transcripts_completed: 0,
                memories_extracted: 0,
            });
        };

        let status = match (state.pid, state.status) {
            (Some(pid), _) if process_exists(pid) => WorkerStatus::Running,
            (Some(_), RunStatus::Running) => WorkerStatus::Crashed,
            (_, RunStatus::Completed) => WorkerStatus::Completed,
            (_, RunStatus::CompletedWithErrors) => WorkerStatus::Failed,
            _ => WorkerStatus::Idle,
        };

        Ok(StatusReport {
            status,
            pid: state.pid,
            started_at: Some(state.started_at.clone()),
            transcripts_total: state.transcripts.len(),
            transcripts_completed: state.completed_count(),
            memories_extracted: state.total_memories(),
        })
    }

    /// Graceful terminate, poll up to 5s, escalate to forceful kill. A
    /// missing process counts as success.
    pub fn stop(&self, now: impl Fn() -> String) -> Result<bool, WatchdogError> {
        let Some(mut state) = self.state_store.load()? else {
            return Ok(true);
        };
        let Some(pid) = state.pid else {
            return Ok(true);
        };

        if !process_exists(pid) {
            state.finish(RunStatus::Cancelled, now());
            self.state_store.save(&state)?;
            return Ok(true);
        }

        kill_signal("-15", pid);
        if !wait_for_exit(pid, STOP_POLL_TIMEOUT) {
            kill_signal("-9", pid);
            wait_for_exit(pid, STOP_POLL_TIMEOUT);
        }

        state.finish(RunStatus::Cancelled, now());
        self.state_store.save(&state)?;
        Ok(true)
    }

    /// Refuses while a worker is running; otherwise deletes state + backup.
    pub fn cleanup_state(&self) -> Result<bool, WatchdogError> {
        if let Some(state) = self.state_store.load()? {
            if state.status == RunStatus::Running {
                if let Some(pid) = state.pid {
                    if process_exists(pid) {
                        return Ok(false);
                    }
                }
            }
        }
        self.state_store.clear()?;
        Ok(true)
    }
}

fn wait_for_exit(pid: u32, timeout: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if !process_exists(pid) {
            return true;
        }
        std::thread::sleep(STOP_POLL_INTERVAL);
    }
    !process_exists(pid)
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
