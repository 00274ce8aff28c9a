// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Two-pass extractor (§4.5): a bounded triage pass narrows the transcript
//! to a handful of ranges, then a single extraction pass turns their full
//! text into structured memories.

use crate::filter::{flatten_content, for_triage};
use crate::llm::{ExtractionOutput, LlmClient, MessageRange};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const TRIAGE_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_TRIAGE_RANGES: usize = 5;
const FALLBACK_COUNT: usize = 50;
const EXTRACTION_METHOD: &str = "two_pass_intelligent";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no messages to extract from")]
    EmptyInput,

    #[error("extraction pass failed: {0}")]
    Llm(#[from] crate::llm::LlmError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    pub extraction_method: String,
    pub total_messages: usize,
    pub processed_messages: usize,
    pub coverage: f64,
    pub ranges_identified: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoPassResult {
    pub memories: Vec<crate::llm::RawMemory>,
    pub key_learnings: Vec<String>,
    pub decisions_made: Vec<String>,
    pub issues_solved: Vec<String>,
    pub metadata: ExtractionMetadata,
}

pub async fn two_pass(
    messages: &[Value],
    client: &dyn LlmClient,
) -> Result<TwoPassResult, ExtractError> {
    if messages.is_empty() {
        return Err(ExtractError::EmptyInput);
    }

    let ranges = triage_with_fallback(messages, client).await;
    let prompt = build_extraction_prompt(messages, &ranges);
    let ExtractionOutput {
        memories,
        key_learnings,
        decisions_made,
        issues_solved,
    } = client.extract(&prompt).await?;

    let processed_messages: usize = ranges.iter().map(|r| r.end.saturating_sub(r.start)).sum();
    let total_messages = messages.len();
    let coverage = if total_messages == 0 {
        0.0
    } else {
        processed_messages as f64 / total_messages as f64
    };

    Ok(TwoPassResult {
        memories,
        key_learnings,
        decisions_made,
        issues_solved,
        metadata: ExtractionMetadata {
            extraction_method: EXTRACTION_METHOD.to_string(),
            total_messages,
            processed_messages,
            coverage,
            ranges_identified: ranges.len(),
        },
    })
}

async fn triage_with_fallback(messages: &[Value], client: &dyn LlmClient) -> Vec<MessageRange> {
    let lines = for_triage(messages);
    let triaged = match tokio::time::timeout(TRIAGE_TIMEOUT, client.triage(&lines)).await {
        Ok(Ok(ranges)) => ranges,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "triage pass failed, falling back");
            Vec::new()
        }
        Err(_) => {
            tracing::warn!("triage pass timed out after {}s, falling back", TRIAGE_TIMEOUT.as_secs());
            Vec::new()
        }
    };

    if triaged.is_empty() {
        fallback_range(messages.len())
    } else {
        triaged.into_iter().take(MAX_TRIAGE_RANGES).collect()
    }
}

fn fallback_range(total: usize) -> Vec<MessageRange> {
    let start = total.saturating_sub(FALLBACK_COUNT);
    vec![MessageRange {
        start,
        end: total,
        reason: "fallback".to_string(),
    }]
}

fn build_extraction_prompt(messages: &[Value], ranges: &[MessageRange]) -> String {
    let mut prompt = String::new();
    for range in ranges {
        for message in messages.iter().take(range.end).skip(range.start) {
            let role = message
                .get("role")
                .or_else(|| message.get("message").and_then(|m| m.get("role")))
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            let content = message
                .get("content")
                .or_else(|| message.get("message").and_then(|m| m.get("content")))
                .cloned()
                .unwrap_or(Value::Null);
            prompt.push_str(&format!(
                "[{role} / {}] {}\n",
                range.reason,
                flatten_content(&content)
            ));
        }
    }
    prompt
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
