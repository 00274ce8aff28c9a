// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Circuit breaker state: `.data/circuit_breaker_state.json` (§6).
//!
//! A corrupt file is treated as empty rather than propagated — the breaker
//! is safety-neutral, so losing its window just re-opens admission (§4.1).

use crate::error::StoreError;
use crate::json_store::JsonStore;
use ddd_core::CircuitState;
use std::path::PathBuf;
use tracing::warn;

pub struct CircuitStore {
    store: JsonStore<CircuitState>,
}

impl CircuitStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
        }
    }

    pub fn load(&self) -> CircuitState {
        match self.store.load() {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "circuit breaker state corrupt, resetting");
                CircuitState::default()
            }
        }
    }

    pub fn save(&self, state: &CircuitState) -> Result<(), StoreError> {
        self.store.save(state)
    }

    pub fn reset(&self) -> Result<(), StoreError> {
        self.store.save(&CircuitState::default())
    }
}

#[cfg(test)]
#[path = "circuit_store_tests.rs"]
mod tests;
