// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The bundled `MemoryStore` adapter: the actual store is named an external
//! collaborator (§1), but this binary still needs somewhere to put memories
//! when no other adapter is configured. Appends one JSON object per line to
//! `.data/memories/memories.jsonl`, the same append-only discipline
//! `ddd-storage`'s `JsonlQueue` uses for the extraction queue.

use async_trait::async_trait;
use ddd_core::Memory;
use ddd_extract::MemoryStore;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

pub struct FileMemoryStore {
    path: PathBuf,
}

impl FileMemoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MemoryStore for FileMemoryStore {
    async fn save(&self, memory: &Memory) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let line = serde_json::to_string(memory).map_err(|e| e.to_string())?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| e.to_string())?;
        writeln!(file, "{line}").map_err(|e| e.to_string())
    }
}

#[cfg(test)]
#[path = "memory_store_tests.rs"]
mod tests;
