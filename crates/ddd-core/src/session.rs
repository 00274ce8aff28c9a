// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator session and manifest entities (§3 Session, SessionManifest).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

crate::define_id! {
    /// Identifier for one orchestrator run (a "session" in DDD terms, distinct
    /// from the host conversational [`crate::transcript::SessionId`]).
    pub struct DddSessionId;
}

crate::define_id! {
    /// Dotted chunk identifier, e.g. `"1.2"`.
    pub struct ChunkId;
}

/// Lifecycle status of one orchestrator session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Handoff,
    Completed,
}

/// One orchestrator run: a continuous stretch of chunk execution between a
/// `start`/`resume` and either a handoff or plan completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: DddSessionId,
    pub started: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended: Option<String>,
    #[serde(default)]
    pub chunks_completed: Vec<ChunkId>,
    #[serde(default)]
    pub tokens_used: u64,
    pub status: SessionStatus,
}

impl Session {
    pub fn new(session_id: DddSessionId, started: String) -> Self {
        Self {
            session_id,
            started,
            ended: None,
            chunks_completed: Vec::new(),
            tokens_used: 0,
            status: SessionStatus::Active,
        }
    }
}

/// Durable index over all orchestrator sessions for a plan.
///
/// Invariant: `current_session`, when set, names exactly one session in
/// `sessions` whose status is `Active` or `Handoff`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionManifest {
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub total_chunks: usize,
    #[serde(default)]
    pub completed_chunks: HashSet<ChunkId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_session: Option<DddSessionId>,
}

impl SessionManifest {
    /// Append a new active session and make it current.
    pub fn start_session(&mut self, session_id: DddSessionId, started: String) {
        self.current_session = Some(session_id.clone());
        self.sessions.push(Session::new(session_id, started));
    }

    /// Mutable access to the current session, if any.
    pub fn current_mut(&mut self) -> Option<&mut Session> {
        let current = self.current_session.clone()?;
        self.sessions.iter_mut().find(|s| s.session_id == current)
    }

    /// Record a chunk as completed against both the manifest-wide set and the
    /// current session's own list.
    pub fn record_chunk_completed(&mut self, chunk: ChunkId, tokens: u64) {
        self.completed_chunks.insert(chunk.clone());
        if let Some(session) = self.current_mut() {
            session.chunks_completed.push(chunk);
            session.tokens_used += tokens;
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
