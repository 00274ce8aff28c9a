// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration (§1a ambient stack): workspace root, derived store
//! paths, and the breaker/budget knobs, resolved from environment variables
//! with documented defaults. Paths are always workspace-rooted.

use std::path::{Path, PathBuf};

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone)]
pub struct Config {
    pub workspace_root: PathBuf,
    pub max_tokens: u64,
    pub memory_system_enabled: bool,
}

impl Config {
    /// Resolve from the environment, with `workspace_root_override` (the
    /// CLI's `-C`/`--project` flag) taking precedence over `DDD_WORKSPACE_ROOT`.
    pub fn from_env(workspace_root_override: Option<PathBuf>) -> Self {
        let workspace_root = workspace_root_override
            .unwrap_or_else(|| PathBuf::from(env_or("DDD_WORKSPACE_ROOT", ".")));
        Self {
            workspace_root,
            max_tokens: env_u64("DDD_MAX_TOKENS", ddd_orchestrator::DEFAULT_MAX_TOKENS),
            memory_system_enabled: env_flag("MEMORY_SYSTEM_ENABLED"),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.workspace_root.join(".data")
    }

    pub fn ai_working_dir(&self) -> PathBuf {
        self.workspace_root.join("ai_working").join("ddd")
    }

    pub fn transcripts_path(&self) -> PathBuf {
        self.data_dir().join("transcripts.json")
    }

    pub fn extraction_queue_path(&self) -> PathBuf {
        self.data_dir().join("extraction_queue.jsonl")
    }

    pub fn circuit_state_path(&self) -> PathBuf {
        self.data_dir().join("circuit_breaker_state.json")
    }

    pub fn memories_dir(&self) -> PathBuf {
        self.data_dir().join("memories")
    }

    pub fn extraction_state_path(&self) -> PathBuf {
        self.memories_dir().join(".extraction_state.json")
    }

    pub fn memories_log_dir(&self) -> PathBuf {
        self.memories_dir().join("logs")
    }

    /// Default sink for the bundled file-backed `MemoryStore` adapter.
    pub fn memories_file(&self) -> PathBuf {
        self.memories_dir().join("memories.jsonl")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.ai_working_dir().join("session_manifest.json")
    }

    pub fn checkpoints_dir(&self) -> PathBuf {
        self.ai_working_dir().join("checkpoints")
    }

    pub fn impl_status_path(&self) -> PathBuf {
        self.ai_working_dir().join("impl_status.md")
    }

    pub fn default_plan_path(&self) -> PathBuf {
        self.ai_working_dir().join("code_plan.md")
    }

    pub fn agents_dir(&self) -> PathBuf {
        self.ai_working_dir().join("agents")
    }

    pub fn repo_root(&self) -> &Path {
        &self.workspace_root
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
