// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session manifest: `ai_working/ddd/session_manifest.json` (§6).
//! Written only by the orchestrator; read by status/resume paths (§5).

use crate::error::StoreError;
use crate::json_store::JsonStore;
use ddd_core::SessionManifest;
use std::path::PathBuf;

pub struct ManifestStore {
    store: JsonStore<SessionManifest>,
}

impl ManifestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
        }
    }

    pub fn load(&self) -> Result<SessionManifest, StoreError> {
        self.store.load()
    }

    pub fn save(&self, manifest: &SessionManifest) -> Result<(), StoreError> {
        self.store.save(manifest)
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
