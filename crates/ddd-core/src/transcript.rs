// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transcript registry entities (§3 TranscriptRecord).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

crate::define_id! {
    /// Identifier for a host conversational session.
    pub struct SessionId;
}

/// A registered transcript awaiting (or having completed) extraction.
///
/// Invariant: `processed == true` implies `processed_at.is_some()` and
/// `memories_extracted >= 0` (enforced by construction, not by the type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub session_id: SessionId,
    pub transcript_path: PathBuf,
    pub created_at: String,
    pub processed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<String>,
    #[serde(default)]
    pub memories_extracted: u32,
}

impl TranscriptRecord {
    /// Construct a freshly registered, unprocessed record.
    pub fn new(session_id: SessionId, transcript_path: PathBuf, created_at: String) -> Self {
        Self {
            session_id,
            transcript_path,
            created_at,
            processed: false,
            processed_at: None,
            memories_extracted: 0,
        }
    }

    /// Mark the record processed, recording the memory count and timestamp.
    ///
    /// Idempotent: calling this twice leaves the first `processed_at` in place
    /// is NOT guaranteed by this method alone — callers enforce "mutated exactly
    /// once" by only calling it from the registry's idempotent `mark_processed`.
    pub fn mark_processed(&mut self, memories_extracted: u32, processed_at: String) {
        self.processed = true;
        self.memories_extracted = memories_extracted;
        self.processed_at = Some(processed_at);
    }
}

/// An append-only work item on the extraction queue (§3 QueuedExtraction).
///
/// Created by the router, removed by the processor on success, left in
/// place with `retries` incremented on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedExtraction {
    pub session_id: SessionId,
    pub transcript_path: PathBuf,
    pub timestamp: String,
    pub hook_event: String,
    #[serde(default)]
    pub retries: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl QueuedExtraction {
    pub fn new(
        session_id: SessionId,
        transcript_path: PathBuf,
        timestamp: String,
        hook_event: String,
    ) -> Self {
        Self {
            session_id,
            transcript_path,
            timestamp,
            hook_event,
            retries: 0,
            last_error: None,
        }
    }

    /// Record a failed processing attempt, incrementing the retry count.
    pub fn record_failure(&mut self, error: String) {
        self.retries += 1;
        self.last_error = Some(error);
    }
}

/// Derive a session id from a transcript filename by stripping the
/// `session_` prefix and any extension (§4.6).
pub fn session_id_from_filename(path: &std::path::Path) -> SessionId {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let trimmed = stem.strip_prefix("session_").unwrap_or(stem);
    SessionId::new(trimmed)
}

#[cfg(test)]
#[path = "transcript_tests.rs"]
mod tests;
