// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction so time-dependent logic (the circuit breaker window,
//! budget/handoff decisions, triage deadlines) can be driven deterministically
//! in tests instead of sleeping on the wall clock.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of truth for "now", abstracted so tests can control it.
pub trait Clock: Send + Sync {
    /// Current time as seconds since the Unix epoch.
    fn now_unix(&self) -> u64;

    /// Current time as an RFC 3339 / ISO-8601 UTC timestamp.
    fn now_iso(&self) -> DateTime<Utc>;
}

/// Real wall-clock implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn now_iso(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic clock for tests: starts at a fixed instant and only moves
/// forward when explicitly advanced.
#[derive(Debug, Clone)]
pub struct FakeClock {
    unix_secs: Arc<Mutex<u64>>,
}

impl FakeClock {
    pub fn new(start_unix: u64) -> Self {
        Self {
            unix_secs: Arc::new(Mutex::new(start_unix)),
        }
    }

    pub fn advance(&self, secs: u64) {
        *self.unix_secs.lock() += secs;
    }

    pub fn set(&self, unix_secs: u64) {
        *self.unix_secs.lock() = unix_secs;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new(1_700_000_000)
    }
}

impl Clock for FakeClock {
    fn now_unix(&self) -> u64 {
        *self.unix_secs.lock()
    }

    fn now_iso(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.now_unix() as i64, 0).unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
