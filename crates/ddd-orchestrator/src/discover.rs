// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent discovery (§4.12): scans a directory of descriptor files for a
//! leading `name:`/`description:` metadata block. Malformed or incomplete
//! descriptors are skipped silently rather than failing discovery.

use ddd_core::{AgentMetadata, Specialization};
use std::path::Path;

/// Discover every well-formed descriptor directly under `dir`.
///
/// Returns them in directory-read order (not sorted) — callers that need a
/// deterministic order should sort by `name` themselves.
pub fn discover(dir: &Path) -> Vec<AgentMetadata> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut agents = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Ok(contents) = std::fs::read_to_string(&path) else {
            continue;
        };
        if let Some(agent) = parse_descriptor(&contents, &path) {
            agents.push(agent);
        }
    }
    agents
}

/// Parse the leading metadata block of one descriptor file. Requires both
/// `name:` and `description:` to be present; everything else is optional.
fn parse_descriptor(contents: &str, path: &Path) -> Option<AgentMetadata> {
    let mut name = None;
    let mut description = None;

    for line in contents.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "---" {
            if name.is_some() && description.is_some() {
                break;
            }
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("name:") {
            name = Some(rest.trim().trim_matches('"').to_string());
        } else if let Some(rest) = trimmed.strip_prefix("description:") {
            description = Some(rest.trim().trim_matches('"').to_string());
        }
    }

    let name = name.filter(|s| !s.is_empty())?;
    let description = description.filter(|s| !s.is_empty())?;
    let specializations = specializations_for(&description);

    Some(AgentMetadata {
        name,
        description,
        specializations,
        location: path.to_path_buf(),
    })
}

fn specializations_for(description: &str) -> Vec<Specialization> {
    let lower = description.to_ascii_lowercase();
    Specialization::ALL
        .into_iter()
        .filter(|tag| tag.keywords().iter().any(|kw| lower.contains(kw)))
        .collect()
}

#[cfg(test)]
#[path = "discover_tests.rs"]
mod tests;
