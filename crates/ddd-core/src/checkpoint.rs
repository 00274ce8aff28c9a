// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checkpoint entity (§3). Created after each completed chunk, at handoff,
//! and as an emergency record ahead of host-initiated context compaction.

use crate::session::{ChunkId, DddSessionId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A durable record of orchestrator state sufficient to resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub checkpoint_id: String,
    pub timestamp: String,
    pub session_id: DddSessionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk: Option<ChunkId>,
    #[serde(default)]
    pub files_modified: Vec<PathBuf>,
    pub test_status: String,
    #[serde(default)]
    pub context: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub next_actions: Vec<String>,
}

impl Checkpoint {
    pub fn is_emergency(&self) -> bool {
        self.context
            .get("emergency")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
