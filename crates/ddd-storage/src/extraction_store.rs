// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Extraction worker state: `.data/memories/.extraction_state.json` (§6).
//! Backed by the generic [`JsonStore`], which already produces the
//! `.backup` companion on every save.

use crate::error::StoreError;
use crate::json_store::JsonStore;
use ddd_core::ExtractionState;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Slot(Option<ExtractionState>);

pub struct ExtractionStateStore {
    store: JsonStore<Slot>,
}

impl ExtractionStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
        }
    }

    /// `None` means no worker has ever run (or state was cleaned up) — the
    /// watchdog derives `idle` from this (§4.8).
    pub fn load(&self) -> Result<Option<ExtractionState>, StoreError> {
        Ok(self.store.load()?.0)
    }

    pub fn save(&self, state: &ExtractionState) -> Result<(), StoreError> {
        self.store.save(&Slot(Some(state.clone())))
    }

    /// Delete state and its backup. Caller (the watchdog) enforces the
    /// "refuses while running" precondition.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.delete()
    }
}

#[cfg(test)]
#[path = "extraction_store_tests.rs"]
mod tests;
