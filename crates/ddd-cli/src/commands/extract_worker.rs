// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The detached extraction worker (§4.7, §1a graceful SIGTERM). Not invoked
//! directly — spawned by `ddd hook`/`ddd start` via `crate::worker_process`.

use crate::config::Config;
use crate::llm_client::ExternalLlmClient;
use crate::memory_store::FileMemoryStore;
use ddd_storage::{ExtractionStateStore, TranscriptRegistry};
use ddd_watchdog::Worker;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const DEFAULT_LLM_COMMAND: &str = "ddd-llm-extract";

/// Install a SIGTERM handler that flips a cooperative cancellation flag,
/// checked by the worker between transcripts (§5) rather than killing the
/// process outright — the watchdog's forceful kill is the fallback.
fn install_sigterm_handler() -> anyhow::Result<Arc<AtomicBool>> {
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    tokio::spawn(async move {
        if sigterm.recv().await.is_some() {
            flag.store(true, Ordering::SeqCst);
        }
    });
    Ok(cancelled)
}

pub async fn run(config: &Config) -> anyhow::Result<()> {
    let cancelled = install_sigterm_handler()?;

    let registry = TranscriptRegistry::new(config.transcripts_path());
    let state_store = ExtractionStateStore::new(config.extraction_state_path());
    let llm_command = std::env::var("DDD_LLM_COMMAND").unwrap_or_else(|_| DEFAULT_LLM_COMMAND.to_string());
    let client = ExternalLlmClient::new(llm_command);
    let store = FileMemoryStore::new(config.memories_file());

    let worker = Worker {
        registry: &registry,
        state_store: &state_store,
        client: &client,
        store: &store,
    };

    let stats = worker
        .run(std::process::id(), super::now_iso, || cancelled.load(Ordering::SeqCst))
        .await?;

    println!("{}", stats.render_marker());
    Ok(())
}
