// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ddd`: CLI surface for the session orchestrator and the memory
//! extraction watchdog, plus the hook wrapper the host invokes per event.

mod commands;
mod config;
mod hook;
mod llm_client;
mod memory_store;
mod output;
mod worker_process;

use clap::{Parser, Subcommand};
use config::Config;
use output::OutputFormat;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "ddd", version, about = "Session orchestrator and memory extraction watchdog")]
struct Cli {
    /// Workspace root (overrides DDD_WORKSPACE_ROOT).
    #[arg(short = 'C', long = "project", global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new orchestrator session from an implementation plan.
    Start {
        #[arg(long = "code-plan")]
        code_plan: Option<PathBuf>,
    },
    /// Resume the most recent session from its last checkpoint.
    Resume,
    /// Report extraction worker status.
    Status {
        #[arg(short = 'o', long = "format", default_value = "text")]
        format: OutputFormat,
        /// Redraw the terminal UI block on an interval until the worker
        /// reaches a terminal state.
        #[arg(long)]
        watch: bool,
    },
    /// Write an emergency checkpoint immediately.
    CheckpointNow {
        #[arg(short = 'o', long = "format", default_value = "text")]
        format: OutputFormat,
    },
    /// Circuit breaker administration.
    Breaker {
        #[command(subcommand)]
        action: BreakerAction,
    },
    /// Print (and optionally follow) the extraction worker's log.
    Logs {
        #[arg(long)]
        follow: bool,
        /// Specific run timestamp (e.g. `20260101_120000`); defaults to the
        /// most recently modified log file.
        #[arg(long)]
        run: Option<String>,
    },
    /// Read one hook event document from stdin, write the response to stdout.
    Hook,
    /// Hidden: the detached extraction worker process (spawned by `start`/`hook`, not invoked directly).
    #[command(name = "__extract-worker", hide = true)]
    ExtractWorker,
}

#[derive(Subcommand)]
enum BreakerAction {
    /// Clear the sliding admission window.
    Reset,
}

fn setup_logging(log_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(log_dir, "ddd.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();
    guard
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = Config::from_env(cli.project);
    let _log_guard = setup_logging(&config.memories_log_dir());

    let result = dispatch(&cli.command, &config).await;
    match result {
        Ok(()) => {}
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e:#}");
            std::process::exit(commands::exit_code_for(&e));
        }
    }
}

async fn dispatch(command: &Commands, config: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Start { code_plan } => commands::start::run(config, code_plan.clone()),
        Commands::Resume => commands::resume::run(config).await,
        Commands::Status { format, watch } => commands::status::run(config, *format, *watch),
        Commands::CheckpointNow { format } => commands::checkpoint_now::run(config, *format),
        Commands::Breaker { action } => match action {
            BreakerAction::Reset => commands::breaker::reset(config),
        },
        Commands::Logs { follow, run } => commands::logs::run(config, run.clone(), *follow),
        Commands::Hook => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(anyhow::Error::from)?;
            let output = hook::run(config, &input);
            println!("{output}");
            Ok(())
        }
        Commands::ExtractWorker => commands::extract_worker::run(config).await,
    }
}
