// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transcript processor (§4.6): load one transcript, run the two-pass
//! extractor, persist memories, report the outcome.

use crate::error::ProcessError;
use crate::extractor::two_pass;
use crate::filter::filter_sidechain;
use crate::llm::LlmClient;
use crate::store::MemoryStore;
use ddd_core::{session_id_from_filename, Memory, MemoryMetadata, SessionId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub session_id: SessionId,
    pub memories_extracted: u32,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    fn failed(session_id: SessionId, error: impl std::fmt::Display) -> Self {
        Self {
            session_id,
            memories_extracted: 0,
            success: false,
            error: Some(error.to_string()),
        }
    }
}

fn load_messages(text: &str) -> Result<Vec<Value>, ProcessError> {
    let mut messages = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|source| ProcessError::MalformedLine {
            line: idx + 1,
            source,
        })?;
        messages.push(value);
    }
    Ok(messages)
}

/// Load `transcript_path`, extract memories, and persist them. A malformed
/// JSONL line is a typed error (the caller fails the whole run); any other
/// failure (empty transcript, extractor error, store error) is caught and
/// reported as `success=false` rather than propagated.
pub async fn process(
    transcript_path: &Path,
    client: &dyn LlmClient,
    store: &dyn MemoryStore,
) -> Result<ExtractionResult, ProcessError> {
    let session_id = session_id_from_filename(transcript_path);
    let text = std::fs::read_to_string(transcript_path)?;
    let messages = load_messages(&text)?;
    let messages = filter_sidechain(&messages);

    let extracted = match two_pass(&messages, client).await {
        Ok(result) => result,
        Err(e) => return Ok(ExtractionResult::failed(session_id, e)),
    };

    let mut saved = 0u32;
    for raw in extracted.memories {
        let mut memory = Memory {
            content: raw.content,
            category: raw.memory_type,
            metadata: MemoryMetadata {
                session_id: session_id.as_str().to_string(),
                importance: raw.importance,
                tags: raw.tags,
                extra: Default::default(),
            },
        };
        memory.clamp_importance();
        if let Err(e) = store.save(&memory).await {
            return Ok(ExtractionResult::failed(session_id, e));
        }
        saved += 1;
    }

    Ok(ExtractionResult {
        session_id,
        memories_extracted: saved,
        success: true,
        error: None,
    })
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
