// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to read plan at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no chunks found in plan at {path}")]
    NoChunks { path: PathBuf },
}

impl PlanError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// One defect found by [`crate::graph::validate`] (§4.10).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("chunk {chunk} depends on unknown chunk {dependency}")]
    DanglingDependency { chunk: String, dependency: String },

    #[error("dependency cycle: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },
}
