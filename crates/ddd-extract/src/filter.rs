// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filter and triage helpers (§4.4): sidechain removal, content flattening,
//! and the truncated message listing fed to the triage pass.

use serde::Serialize;
use serde_json::Value;

const TRIAGE_TRUNCATE_CHARS: usize = 100;

/// One message prepared for the triage prompt: its original index into the
/// untruncated `messages` array (ranges reference this index), role, and
/// truncated text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageLine {
    pub index: usize,
    pub role: String,
    pub text: String,
}

fn is_sidechain(message: &Value) -> bool {
    let top = message.get("isSidechain").and_then(Value::as_bool).unwrap_or(false);
    let nested = message
        .get("message")
        .and_then(|m| m.get("isSidechain"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    top || nested
}

/// Drop every message flagged sidechain, at either nesting level.
pub fn filter_sidechain(messages: &[Value]) -> Vec<Value> {
    messages.iter().filter(|m| !is_sidechain(m)).cloned().collect()
}

/// Flatten a message's `content` field: a list of typed blocks joins the
/// `type="text"` blocks with spaces; a plain string passes through; anything
/// else is stringified.
pub fn flatten_content(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        Value::Array(blocks) => blocks
            .iter()
            .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|b| b.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}...")
}

fn role_of(message: &Value) -> Option<String> {
    message
        .get("role")
        .or_else(|| message.get("message").and_then(|m| m.get("role")))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn content_of(message: &Value) -> Value {
    message
        .get("content")
        .or_else(|| message.get("message").and_then(|m| m.get("content")))
        .cloned()
        .unwrap_or(Value::Null)
}

/// Build the condensed, truncated listing the triage prompt is built from.
/// Non-`{user, assistant}` roles are dropped; indices index into the
/// original (pre-filter) `messages` slice so triage ranges remain valid.
pub fn for_triage(messages: &[Value]) -> Vec<TriageLine> {
    messages
        .iter()
        .enumerate()
        .filter_map(|(index, message)| {
            let role = role_of(message)?;
            if role != "user" && role != "assistant" {
                return None;
            }
            let text = truncate(&flatten_content(&content_of(message)), TRIAGE_TRUNCATE_CHARS);
            Some(TriageLine { index, role, text })
        })
        .collect()
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
