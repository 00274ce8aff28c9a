// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ChunkSpec`: a unit of implementation work parsed from a plan document
//! (§3, §4.10).

use crate::session::ChunkId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complexity tag, either read explicitly from the plan or inferred from
/// estimated line count (§4.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    /// Infer from an estimated line count: `<200` simple, `<400` medium,
    /// otherwise complex; an unknown (`0`) line count defaults to medium.
    pub fn infer(estimated_lines: u32) -> Self {
        match estimated_lines {
            0 => Complexity::Medium,
            n if n < 200 => Complexity::Simple,
            n if n < 400 => Complexity::Medium,
            _ => Complexity::Complex,
        }
    }

    /// Budget multiplier used by the token estimator (§4.11).
    pub fn multiplier(self) -> f64 {
        match self {
            Complexity::Simple => 1.0,
            Complexity::Medium => 1.5,
            Complexity::Complex => 3.0,
        }
    }
}

/// One node in the chunk DAG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkSpec {
    pub id: ChunkId,
    pub title: String,
    pub estimated_tokens: u64,
    #[serde(default)]
    pub dependencies: Vec<ChunkId>,
    #[serde(default)]
    pub files_to_create: Vec<PathBuf>,
    pub complexity: Complexity,
}

#[cfg(test)]
#[path = "chunk_tests.rs"]
mod tests;
