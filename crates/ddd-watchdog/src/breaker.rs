// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Circuit breaker (§4.2): a sliding window over recent hook admissions,
//! persisted across process restarts via [`ddd_storage::CircuitStore`].

use ddd_storage::CircuitStore;

const WINDOW_SECS: u64 = 60;
const THRESHOLD: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Admission {
    pub allowed: bool,
    pub reason: Option<String>,
    pub wait_seconds: u64,
    pub recent_count: usize,
}

pub struct CircuitBreaker {
    store: CircuitStore,
}

impl CircuitBreaker {
    pub fn new(store: CircuitStore) -> Self {
        Self { store }
    }

    /// Evaluate and record an admission attempt at `now` (unix seconds).
    pub fn admit(&self, now: u64) -> Result<Admission, ddd_storage::StoreError> {
        let mut state = self.store.load();
        state.timestamps.retain(|&ts| now.saturating_sub(ts) < WINDOW_SECS);

        if state.timestamps.len() >= THRESHOLD {
            let oldest = state.timestamps.iter().min().copied().unwrap_or(now);
            let wait_seconds = WINDOW_SECS.saturating_sub(now.saturating_sub(oldest));
            let recent_count = state.timestamps.len();
            self.store.save(&state)?;
            return Ok(Admission {
                allowed: false,
                reason: Some(format!(
                    "circuit breaker open: {recent_count} admissions in the last {WINDOW_SECS}s"
                )),
                wait_seconds,
                recent_count,
            });
        }

        state.timestamps.push(now);
        let recent_count = state.timestamps.len();
        self.store.save(&state)?;
        Ok(Admission {
            allowed: true,
            reason: None,
            wait_seconds: 0,
            recent_count,
        })
    }

    pub fn reset(&self) -> Result<(), ddd_storage::StoreError> {
        self.store.reset()
    }
}

#[cfg(test)]
#[path = "breaker_tests.rs"]
mod tests;
