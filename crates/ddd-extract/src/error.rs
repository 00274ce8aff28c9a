// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("transcript not found: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed transcript line {line}: {source}")]
    MalformedLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Extract(#[from] crate::extractor::ExtractError),

    #[error("memory store failed: {0}")]
    Store(String),
}
