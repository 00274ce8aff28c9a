// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::config::Config;
use crate::output;
use std::path::{Path, PathBuf};

fn latest_log(dir: &Path) -> anyhow::Result<PathBuf> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "log"))
        .collect();
    // filenames embed a sortable `extraction_<YYYYMMDD_HHMMSS>.log` timestamp.
    entries.sort();
    entries
        .pop()
        .ok_or_else(|| anyhow::anyhow!("no extraction logs found under {}", dir.display()))
}

pub fn run(config: &Config, run_ts: Option<String>, follow: bool) -> anyhow::Result<()> {
    let path = match run_ts {
        Some(ts) => ddd_watchdog::log_path(&config.memories_dir(), &ts),
        None => latest_log(&config.memories_log_dir())?,
    };
    output::display_log(&path, follow)?;
    Ok(())
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
