// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted sliding-window state for the hook circuit breaker (§3, §4.2).

use serde::{Deserialize, Serialize};

/// Sliding window of recent hook admission timestamps (unix seconds).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitState {
    #[serde(default)]
    pub timestamps: Vec<u64>,
}

#[cfg(test)]
#[path = "circuit_tests.rs"]
mod tests;
