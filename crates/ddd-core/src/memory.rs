// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Memory` record produced by extraction (§3). Storage treats the
//! content and category as opaque; only `metadata` fields are inspected by
//! this system (to enrich with session id, importance, tags — §4.6).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata attached to every persisted memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryMetadata {
    pub session_id: String,
    pub importance: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Any additional fields the extractor attached (opaque passthrough).
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A single extracted memory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub content: String,
    pub category: String,
    pub metadata: MemoryMetadata,
}

impl Memory {
    /// Clamp importance into the documented `[0, 1]` range (defensive against
    /// an extractor returning an out-of-range score).
    pub fn clamp_importance(&mut self) {
        self.metadata.importance = self.metadata.importance.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
