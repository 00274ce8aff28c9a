// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator (§4.14): drives one session's worth of chunk execution,
//! coordinating the plan, budget, agent selection, and conflict detection
//! into start/resume/execute/handoff/run.

use crate::budget::{self, DEFAULT_MAX_TOKENS};
use crate::conflict;
use crate::discover;
use crate::error::OrchestratorError;
use crate::select;
use ddd_core::{ChunkId, ChunkSpec, DddSessionId, SessionStatus};
use ddd_storage::{CheckpointStore, ImplStatusLog, ManifestStore};
use serde_json::json;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Live state for the session currently being driven. Not persisted
/// directly — every mutation is mirrored into the manifest and a
/// checkpoint before `execute`/`handoff` return.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub session_id: DddSessionId,
    pub completed: HashSet<ChunkId>,
    pub tokens_used: u64,
}

#[derive(Debug, Clone)]
pub enum ExecuteOutcome {
    Completed { chunk: ChunkId, tokens_used: u64 },
    Handoff { reason: String },
}

pub struct Orchestrator {
    pub manifest: ManifestStore,
    pub checkpoints: CheckpointStore,
    pub impl_status: ImplStatusLog,
    pub agents_dir: PathBuf,
    pub max_tokens: u64,
}

impl Orchestrator {
    pub fn new(
        manifest: ManifestStore,
        checkpoints: CheckpointStore,
        impl_status: ImplStatusLog,
        agents_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            manifest,
            checkpoints,
            impl_status,
            agents_dir: agents_dir.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// `start(plan)`: parse + validate, allocate a session, register it as
    /// current, and open the impl-status log.
    pub fn start(
        &self,
        plan_path: &Path,
        now: &str,
    ) -> Result<(SessionState, Vec<ChunkSpec>), OrchestratorError> {
        let chunks = ddd_plan::parse(plan_path)?;
        let errors = ddd_plan::validate(&chunks);
        if !errors.is_empty() {
            return Err(OrchestratorError::Validation(errors));
        }

        let session_id = DddSessionId::new(ddd_core::new_session_id());

        let mut manifest = self.manifest.load()?;
        manifest.total_chunks = chunks.len();
        manifest.start_session(session_id.clone(), now.to_string());
        self.manifest.save(&manifest)?;
        self.impl_status.append_session_start(session_id.as_str(), now)?;

        Ok((
            SessionState {
                session_id,
                completed: HashSet::new(),
                tokens_used: 0,
            },
            chunks,
        ))
    }

    /// `resume()`: load the latest checkpoint, refuse on working-tree
    /// conflicts, and reconstruct state from the matching manifest session
    /// and the checkpoint's own context.
    pub async fn resume(&self, repo_root: &Path) -> Result<SessionState, OrchestratorError> {
        let checkpoint = self
            .checkpoints
            .latest()?
            .ok_or(OrchestratorError::NoCheckpoint)?;

        let report = conflict::check(&checkpoint, repo_root).await;
        if report.has_conflicts {
            return Err(OrchestratorError::Conflicts(report.recommendations));
        }

        let manifest = self.manifest.load()?;
        let tokens_used = manifest
            .sessions
            .iter()
            .find(|s| s.session_id == checkpoint.session_id)
            .map(|s| s.tokens_used)
            .unwrap_or(0);

        let completed: HashSet<ChunkId> = checkpoint
            .context
            .get("completed_chunks")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(ChunkId::new)
                    .collect()
            })
            .unwrap_or_default();

        Ok(SessionState {
            session_id: checkpoint.session_id,
            completed,
            tokens_used,
        })
    }

    /// `execute(chunk, state)`: select an agent, estimate tokens, check the
    /// handoff trigger, then (on proceed) checkpoint and persist progress.
    pub fn execute(
        &self,
        chunk: &ChunkSpec,
        state: &mut SessionState,
        now: &str,
    ) -> Result<ExecuteOutcome, OrchestratorError> {
        let agents = discover::discover(&self.agents_dir);
        let agent_name = select::select(chunk, &agents);
        let estimate = budget::estimate(chunk);

        if budget::should_handoff(state.tokens_used, estimate, self.max_tokens) {
            return Ok(ExecuteOutcome::Handoff {
                reason: format!(
                    "estimated {estimate} tokens for chunk {} would exceed the remaining budget",
                    chunk.id,
                ),
            });
        }

        tracing::info!(chunk = %chunk.id, agent = %agent_name, estimate, "executing chunk");

        state.completed.insert(chunk.id.clone());
        state.tokens_used += estimate;

        let completed_ids: Vec<String> = state.completed.iter().map(|c| c.as_str().to_string()).collect();
        let checkpoint = ddd_core::Checkpoint {
            checkpoint_id: ddd_core::new_checkpoint_id(None),
            timestamp: now.to_string(),
            session_id: state.session_id.clone(),
            chunk: Some(chunk.id.clone()),
            files_modified: chunk.files_to_create.clone(),
            test_status: "pending".to_string(),
            context: [
                ("completed_chunks".to_string(), json!(completed_ids)),
                ("tokens_used".to_string(), json!(state.tokens_used)),
            ]
            .into_iter()
            .collect(),
            next_actions: vec![],
        };
        self.checkpoints.save(&checkpoint)?;

        let mut manifest = self.manifest.load()?;
        manifest.record_chunk_completed(chunk.id.clone(), estimate);
        self.manifest.save(&manifest)?;

        self.impl_status.append_chunk_completed(chunk.id.as_str(), now)?;

        Ok(ExecuteOutcome::Completed {
            chunk: chunk.id.clone(),
            tokens_used: state.tokens_used,
        })
    }

    /// `handoff(state, reason)`: write a terminal handoff checkpoint and
    /// mark the manifest session ended.
    pub fn handoff(
        &self,
        state: &SessionState,
        reason: &str,
        now: &str,
    ) -> Result<(), OrchestratorError> {
        let completed_ids: Vec<String> = state.completed.iter().map(|c| c.as_str().to_string()).collect();
        let checkpoint = ddd_core::Checkpoint {
            checkpoint_id: ddd_core::new_checkpoint_id(None),
            timestamp: now.to_string(),
            session_id: state.session_id.clone(),
            chunk: None,
            files_modified: vec![],
            test_status: "handoff".to_string(),
            context: [
                ("tokens_used".to_string(), json!(state.tokens_used)),
                ("completed_chunks".to_string(), json!(completed_ids)),
                ("handoff_reason".to_string(), json!(reason)),
            ]
            .into_iter()
            .collect(),
            next_actions: vec![],
        };
        self.checkpoints.save(&checkpoint)?;

        let mut manifest = self.manifest.load()?;
        if let Some(session) = manifest
            .sessions
            .iter_mut()
            .find(|s| s.session_id == state.session_id)
        {
            session.status = SessionStatus::Handoff;
            session.ended = Some(now.to_string());
        }
        self.manifest.save(&manifest)?;

        self.impl_status
            .append_line(&format!("handoff: {reason}"), now)?;
        Ok(())
    }

    /// `run`: drive the main loop to completion or handoff. The caller owns
    /// per-chunk agent delegation (this system coordinates; it does not
    /// perform the edits itself) and invokes [`Orchestrator::execute`] via
    /// `on_chunk` for each selected chunk.
    pub fn run(
        &self,
        chunks: &[ChunkSpec],
        state: &mut SessionState,
        now: &str,
    ) -> Result<RunOutcome, OrchestratorError> {
        loop {
            let Some(chunk) = ddd_plan::get_next(chunks, &state.completed) else {
                let mut manifest = self.manifest.load()?;
                if let Some(session) = manifest
                    .sessions
                    .iter_mut()
                    .find(|s| s.session_id == state.session_id)
                {
                    session.status = SessionStatus::Completed;
                    session.ended = Some(now.to_string());
                }
                self.manifest.save(&manifest)?;
                self.impl_status.append_line("session_complete", now)?;
                return Ok(RunOutcome::Completed);
            };

            match self.execute(chunk, state, now)? {
                ExecuteOutcome::Completed { .. } => continue,
                ExecuteOutcome::Handoff { reason } => {
                    self.handoff(state, &reason, now)?;
                    return Ok(RunOutcome::HandedOff { reason });
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed,
    HandedOff { reason: String },
}

/// Write an emergency checkpoint derived from the most recent impl-status
/// entries, tagged with `reason` (e.g. `pre_compact` ahead of a host-initiated
/// context compaction, or `interrupted` after an unhandled exception, per
/// §4.14). Never fails the caller — the triggering event proceeds regardless.
pub fn emergency_checkpoint(
    checkpoints: &CheckpointStore,
    impl_status: &ImplStatusLog,
    now: &str,
    reason: &str,
) -> Result<(), OrchestratorError> {
    let last = impl_status.last_session()?;
    let Some(session_id) = last.session_id else {
        return Ok(());
    };

    let checkpoint = ddd_core::Checkpoint {
        checkpoint_id: ddd_core::new_checkpoint_id(Some(reason)),
        timestamp: now.to_string(),
        session_id: DddSessionId::new(session_id),
        chunk: last.last_chunk.map(ChunkId::new),
        files_modified: last.modified_files,
        test_status: "unknown".to_string(),
        context: [
            ("emergency".to_string(), json!(true)),
            ("reason".to_string(), json!(reason)),
        ]
        .into_iter()
        .collect(),
        next_actions: vec![],
    };
    checkpoints.save(&checkpoint)?;
    Ok(())
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
