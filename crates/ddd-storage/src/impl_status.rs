// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Implementation status log: `ai_working/ddd/impl_status.md` (§4.14).
//!
//! An append-only markdown log, one `## Session <id>` block per orchestrator
//! session. Edits reported by the host's PostToolUse hook are appended as
//! `- [MODIFIED] <path> (<timestamp>)` lines under the most recent header;
//! the orchestrator appends its own chunk/session lifecycle lines the same
//! way. The emergency-checkpoint path (§4.14) reads the file back to recover
//! the last session id, last chunk, and accumulated modified paths.

use crate::error::StoreError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct ImplStatusLog {
    path: PathBuf,
}

/// What the emergency-checkpoint path needs to recover from the log without
/// re-deriving state from the manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LastSession {
    pub session_id: Option<String>,
    pub last_chunk: Option<String>,
    pub modified_files: Vec<PathBuf>,
}

impl ImplStatusLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_raw(&self, text: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| StoreError::io(&self.path, e))
    }

    /// Open a new `## Session <id> (<timestamp>)` block and its `session_start` line.
    pub fn append_session_start(&self, session_id: &str, timestamp: &str) -> Result<(), StoreError> {
        self.append_raw(&format!(
            "## Session {session_id} ({timestamp})\n- session_start ({timestamp})\n"
        ))
    }

    /// Append a chunk-completion line under the current session block.
    pub fn append_chunk_completed(&self, chunk_id: &str, timestamp: &str) -> Result<(), StoreError> {
        self.append_raw(&format!("- [CHUNK] {chunk_id} completed ({timestamp})\n"))
    }

    /// Append a modified-file line under the current session block (PostToolUse).
    pub fn append_modified(&self, path: &Path, timestamp: &str) -> Result<(), StoreError> {
        self.append_raw(&format!("- [MODIFIED] {} ({timestamp})\n", path.display()))
    }

    /// Append a free-form status line, e.g. the final `session_complete` marker.
    pub fn append_line(&self, line: &str, timestamp: &str) -> Result<(), StoreError> {
        self.append_raw(&format!("- {line} ({timestamp})\n"))
    }

    /// Whether any session block has been opened yet — used to gate
    /// PostToolUse edit tracking ("a DDD session is active").
    pub fn is_active(&self) -> Result<bool, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(!contents.trim().is_empty()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    /// Parse the most recent `## Session` block: its id, the last completed
    /// chunk mentioned, and every modified-file path recorded in it.
    pub fn last_session(&self) -> Result<LastSession, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(LastSession::default()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let Some(block_start) = contents.rfind("## Session ") else {
            return Ok(LastSession::default());
        };
        let block = &contents[block_start..];

        let header = block.lines().next().unwrap_or_default();
        let session_id = header
            .trim_start_matches("## Session ")
            .split(['(', ' '])
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let mut last_chunk = None;
        let mut modified_files = Vec::new();
        for line in block.lines().skip(1) {
            if let Some(rest) = line.trim_start().strip_prefix("- [CHUNK] ") {
                if let Some(id) = rest.split(' ').next() {
                    last_chunk = Some(id.to_string());
                }
            } else if let Some(rest) = line.trim_start().strip_prefix("- [MODIFIED] ") {
                if let Some(path_part) = rest.rsplit_once(" (") {
                    modified_files.push(PathBuf::from(path_part.0));
                }
            }
        }

        Ok(LastSession {
            session_id,
            last_chunk,
            modified_files,
        })
    }
}

#[cfg(test)]
#[path = "impl_status_tests.rs"]
mod tests;
