// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plan parser (§4.10): scans an implementation plan line-by-line for chunk
//! headings, file lists, dependency mentions, and complexity overrides.

use crate::error::PlanError;
use ddd_core::{ChunkId, ChunkSpec, Complexity};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Default source-file extensions recognized in `File[s]:` lines. Callers
/// embedding this in a different host language pass their own set via
/// [`parse_with_extensions`].
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["rs", "py", "js", "ts", "go", "java", "rb"];

const BASE_TOKENS_PER_LINE: u64 = 8;
const FALLBACK_TOKENS: u64 = 1000;

pub fn parse(plan_path: &Path) -> Result<Vec<ChunkSpec>, PlanError> {
    parse_with_extensions(plan_path, DEFAULT_SOURCE_EXTENSIONS)
}

pub fn parse_with_extensions(
    plan_path: &Path,
    extensions: &[&str],
) -> Result<Vec<ChunkSpec>, PlanError> {
    let text = std::fs::read_to_string(plan_path).map_err(|e| PlanError::io(plan_path, e))?;

    let heading = Regex::new(
        r"(?i)^\s*(?:chunk|layer)\s+(\d+\.\d+)\s*:\s*(.+?)(?:\s*\(~?\s*(\d+)\s*lines?\s*\))?\s*$",
    )
    .expect("static heading pattern is valid");
    let files_line = Regex::new(r"(?i)^\s*files?\s*:\s*(.+)$").expect("static files pattern is valid");
    let complexity_line =
        Regex::new(r"(?i)^\s*complexity\s*:\s*(simple|medium|complex)\s*$").expect("static complexity pattern is valid");
    let dotted_id = Regex::new(r"\d+\.\d+").expect("static dotted-id pattern is valid");

    let mut chunks: Vec<ChunkSpec> = Vec::new();
    let mut current: Option<ChunkSpec> = None;

    let flush = |current: Option<ChunkSpec>, chunks: &mut Vec<ChunkSpec>| {
        if let Some(chunk) = current {
            chunks.push(chunk);
        }
    };

    for line in text.lines() {
        if let Some(caps) = heading.captures(line) {
            flush(current.take(), &mut chunks);
            let id = caps.get(1).expect("heading capture 1 is required by the pattern").as_str();
            let title = caps.get(2).expect("heading capture 2 is required by the pattern").as_str().trim();
            let estimated_lines: u32 = caps
                .get(3)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0);
            let complexity = Complexity::infer(estimated_lines);
            let estimated_tokens = estimate_tokens(estimated_lines);
            current = Some(ChunkSpec {
                id: ChunkId::new(id),
                title: title.to_string(),
                estimated_tokens,
                dependencies: Vec::new(),
                files_to_create: Vec::new(),
                complexity,
            });
            continue;
        }

        let Some(chunk) = current.as_mut() else {
            continue;
        };

        if let Some(caps) = files_line.captures(line) {
            let list = caps.get(1).expect("files capture 1 is required by the pattern").as_str();
            for raw in list.split(',') {
                let candidate = raw.trim();
                if candidate.is_empty() {
                    continue;
                }
                let path = PathBuf::from(candidate);
                let ext_matches = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(e)))
                    .unwrap_or(false);
                if ext_matches {
                    chunk.files_to_create.push(path);
                }
            }
            continue;
        }

        if let Some(caps) = complexity_line.captures(line) {
            let word = caps.get(1).expect("complexity capture 1 is required by the pattern").as_str();
            chunk.complexity = match word.to_ascii_lowercase().as_str() {
                "simple" => Complexity::Simple,
                "medium" => Complexity::Medium,
                "complex" => Complexity::Complex,
                _ => chunk.complexity,
            };
            continue;
        }

        let lower = line.to_ascii_lowercase();
        if lower.contains("depend") || lower.contains("layer") {
            for m in dotted_id.find_iter(line) {
                let candidate = m.as_str();
                if candidate != chunk.id.as_str() {
                    let dep = ChunkId::new(candidate);
                    if !chunk.dependencies.contains(&dep) {
                        chunk.dependencies.push(dep);
                    }
                }
            }
        }
    }
    flush(current, &mut chunks);

    if chunks.is_empty() {
        return Err(PlanError::NoChunks {
            path: plan_path.to_path_buf(),
        });
    }

    Ok(chunks)
}

fn estimate_tokens(estimated_lines: u32) -> u64 {
    if estimated_lines == 0 {
        FALLBACK_TOKENS
    } else {
        u64::from(estimated_lines) * BASE_TOKENS_PER_LINE
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
