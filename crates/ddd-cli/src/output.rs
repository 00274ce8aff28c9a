// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI-facing output (§1a): human and JSON rendering for read commands, plus
//! the `--watch` redraw loop shared by `ddd status`. Library crates never
//! print; everything user-visible funnels through here.

use clap::ValueEnum;
use notify::{RecursiveMode, Watcher};
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Render `value` as pretty JSON, or via `human` for text mode.
pub fn render<T: Serialize>(format: OutputFormat, value: &T, human: impl FnOnce(&T) -> String) {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
        OutputFormat::Text => println!("{}", human(value)),
    }
}

/// Repeatedly invoke `render_once` on an interval until the process is
/// interrupted, for `ddd status --watch`. `render_once` returns `true` to
/// keep watching, `false` to stop (e.g. the worker reached a terminal state).
pub fn watch(interval: Duration, mut render_once: impl FnMut() -> bool) {
    loop {
        if !render_once() {
            break;
        }
        std::thread::sleep(interval);
    }
}

/// Print a log file's current contents, then (if `follow`) keep printing
/// lines appended to it until interrupted. Used by `ddd logs`.
pub fn display_log(path: &Path, follow: bool) -> std::io::Result<()> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    print!("{contents}");

    if !follow {
        return Ok(());
    }
    tail_file(path, file.stream_position()?)
}

/// Follow a file from `offset` onward, printing new lines as a watcher
/// reports writes. Falls back to silent return if the watcher cannot be
/// installed (e.g. the platform lacks inotify/FSEvents support).
fn tail_file(path: &Path, mut offset: u64) -> std::io::Result<()> {
    let (tx, rx) = channel();
    let mut watcher = match notify::recommended_watcher(tx) {
        Ok(w) => w,
        Err(_) => return Ok(()),
    };
    if watcher.watch(path, RecursiveMode::NonRecursive).is_err() {
        return Ok(());
    }

    while rx.recv().is_ok() {
        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(offset))?;
        let mut chunk = String::new();
        file.read_to_string(&mut chunk)?;
        if !chunk.is_empty() {
            print!("{chunk}");
            offset = file.stream_position()?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
