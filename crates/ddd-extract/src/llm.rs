// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The LLM client boundary (§1, §4.5): extraction and triage are performed
//! by an external collaborator. This crate depends only on the [`LlmClient`]
//! trait; the concrete client (and its prompt construction) lives outside
//! this workspace.

use crate::filter::TriageLine;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("llm call failed: {0}")]
    Failed(String),
}

/// One triage-selected slice of the original message array. `end` is
/// exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRange {
    pub start: usize,
    pub end: usize,
    pub reason: String,
}

/// One memory as structured by the extraction pass, before storage
/// metadata (`session_id`) is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMemory {
    #[serde(rename = "type")]
    pub memory_type: String,
    pub content: String,
    pub importance: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Structured output of the extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionOutput {
    #[serde(default)]
    pub memories: Vec<RawMemory>,
    #[serde(default)]
    pub key_learnings: Vec<String>,
    #[serde(default)]
    pub decisions_made: Vec<String>,
    #[serde(default)]
    pub issues_solved: Vec<String>,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Propose up to 5 ranges worth extracting from, given the condensed
    /// triage listing.
    async fn triage(&self, lines: &[TriageLine]) -> Result<Vec<MessageRange>, LlmError>;

    /// Produce structured memories from the full (non-truncated) text of
    /// the selected ranges.
    async fn extract(&self, prompt: &str) -> Result<ExtractionOutput, LlmError>;
}
