// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::config::Config;
use ddd_storage::CircuitStore;
use ddd_watchdog::CircuitBreaker;

pub fn reset(config: &Config) -> anyhow::Result<()> {
    let breaker = CircuitBreaker::new(CircuitStore::new(config.circuit_state_path()));
    breaker.reset()?;
    println!("circuit breaker reset");
    Ok(())
}

#[cfg(test)]
#[path = "breaker_tests.rs"]
mod tests;
