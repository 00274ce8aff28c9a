// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checkpoint store: `ai_working/ddd/checkpoints/*.json` (§6).
//!
//! Each checkpoint is written to its own file named `<checkpoint_id>.json`.
//! A `latest.json` pointer (just the checkpoint id) is updated alongside
//! every save so `resume()` does not need to scan the directory and compare
//! timestamps.

use crate::error::StoreError;
use ddd_core::Checkpoint;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CheckpointStore {
    dir: PathBuf,
}

impl CheckpointStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn checkpoint_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn pointer_path(&self) -> PathBuf {
        self.dir.join("latest.json")
    }

    /// Persist a checkpoint and advance the `latest` pointer to it.
    pub fn save(&self, checkpoint: &Checkpoint) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        let path = self.checkpoint_path(&checkpoint.checkpoint_id);
        let json = serde_json::to_string_pretty(checkpoint)
            .map_err(|e| StoreError::corrupt(&path, e.to_string()))?;
        fs::write(&path, json).map_err(|e| StoreError::io(&path, e))?;

        let pointer = self.pointer_path();
        fs::write(&pointer, &checkpoint.checkpoint_id).map_err(|e| StoreError::io(&pointer, e))?;
        Ok(())
    }

    /// Load the most recently saved checkpoint, if any.
    pub fn latest(&self) -> Result<Option<Checkpoint>, StoreError> {
        let pointer = self.pointer_path();
        let id = match fs::read_to_string(&pointer) {
            Ok(s) => s.trim().to_string(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&pointer, e)),
        };
        self.load(&id)
    }

    pub fn load(&self, id: &str) -> Result<Option<Checkpoint>, StoreError> {
        let path = self.checkpoint_path(id);
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map(Some)
                .map_err(|e| StoreError::corrupt(&path, e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
#[path = "checkpoints_tests.rs"]
mod tests;
