// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the detached extraction worker process (§4.8's `spawn` callback):
//! re-executes this same binary under the hidden `__extract-worker`
//! subcommand, in its own process group and with stdio redirected to the
//! per-run log file, so the host can exit without taking the worker down
//! with it.

use crate::config::Config;
use std::io;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Child, Command, Stdio};

pub const WORKER_SUBCOMMAND: &str = "__extract-worker";

/// Build (but do not spawn) the `Command` for a detached worker run rooted
/// at `config.workspace_root`, logging to `log_path`.
pub fn worker_command(config: &Config, log_path: &Path) -> io::Result<Command> {
    let exe = std::env::current_exe()?;
    let mut command = Command::new(exe);
    command
        .arg(WORKER_SUBCOMMAND)
        .arg("--project")
        .arg(&config.workspace_root)
        .stdin(Stdio::null());

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    let log_err = log.try_clone()?;
    command.stdout(log).stderr(log_err);

    // own process group so a SIGINT/SIGHUP to the host's group doesn't
    // propagate to the worker; the watchdog owns its lifecycle from here.
    command.process_group(0);
    Ok(command)
}

pub fn spawn(config: &Config, log_path: &Path) -> io::Result<Child> {
    worker_command(config, log_path)?.spawn()
}

#[cfg(test)]
#[path = "worker_process_tests.rs"]
mod tests;
