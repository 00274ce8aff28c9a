// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transcript registry: `.data/transcripts.json` (§6).

use crate::error::StoreError;
use crate::json_store::JsonStore;
use ddd_core::{SessionId, TranscriptRecord};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Registry {
    #[serde(default)]
    records: Vec<TranscriptRecord>,
}

pub struct TranscriptRegistry {
    store: JsonStore<Registry>,
}

impl TranscriptRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Register a transcript. Idempotent: a second call for the same
    /// `session_id` is a no-op (§8 property 1).
    pub fn add(&self, record: TranscriptRecord) -> Result<(), StoreError> {
        let mut registry = self.store.load()?;
        if registry
            .records
            .iter()
            .any(|r| r.session_id == record.session_id)
        {
            return Ok(());
        }
        registry.records.push(record);
        self.store.save(&registry)
    }

    /// All registered transcripts with `processed == false`, in registration
    /// order (§4.7 step 1, §5 ordering guarantee).
    pub fn unprocessed(&self) -> Result<Vec<TranscriptRecord>, StoreError> {
        let registry = self.store.load()?;
        Ok(registry
            .records
            .into_iter()
            .filter(|r| !r.processed)
            .collect())
    }

    /// Mark a transcript processed with the given memory count. No-op if the
    /// session id is not registered or already processed.
    pub fn mark_processed(
        &self,
        session_id: &SessionId,
        memories_extracted: u32,
        processed_at: String,
    ) -> Result<(), StoreError> {
        let mut registry = self.store.load()?;
        if let Some(record) = registry
            .records
            .iter_mut()
            .find(|r| &r.session_id == session_id)
        {
            if !record.processed {
                record.mark_processed(memories_extracted, processed_at);
            }
        }
        self.store.save(&registry)
    }

    pub fn all(&self) -> Result<Vec<TranscriptRecord>, StoreError> {
        Ok(self.store.load()?.records)
    }
}

#[cfg(test)]
#[path = "transcripts_tests.rs"]
mod tests;
