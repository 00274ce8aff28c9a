// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent selection (§4.12): a fixed rule chain from chunk shape to agent
//! name, falling back to keyword overlap and finally a hardcoded default.

use ddd_core::{AgentMetadata, ChunkSpec, Complexity, Specialization};

const DEFAULT_AGENT: &str = "modular-builder";
const ARCHITECT_AGENT: &str = "zen-architect";
const WARN_TOKEN_THRESHOLD: u64 = 10_000;

pub fn select(chunk: &ChunkSpec, agents: &[AgentMetadata]) -> String {
    let name = select_inner(chunk, agents);
    if chunk.estimated_tokens > WARN_TOKEN_THRESHOLD {
        tracing::warn!(
            chunk = %chunk.id,
            estimated_tokens = chunk.estimated_tokens,
            agent = %name,
            "chunk estimate exceeds warn threshold",
        );
    }
    name
}

fn select_inner(chunk: &ChunkSpec, agents: &[AgentMetadata]) -> String {
    if chunk.dependencies.is_empty() && has_agent(agents, DEFAULT_AGENT) {
        return DEFAULT_AGENT.to_string();
    }

    let mentions_test =
        chunk.id.as_str().to_ascii_lowercase().contains("test") || chunk.title.to_ascii_lowercase().contains("test");
    if mentions_test {
        if let Some(agent) = first_tagged(agents, Specialization::Testing) {
            return agent;
        }
    }

    if chunk.complexity == Complexity::Complex {
        if has_agent(agents, ARCHITECT_AGENT) {
            return ARCHITECT_AGENT.to_string();
        }
        if let Some(agent) = first_tagged(agents, Specialization::Architecture) {
            return agent;
        }
    }

    if let Some(agent) = best_keyword_match(chunk, agents) {
        return agent;
    }

    if has_agent(agents, DEFAULT_AGENT) {
        return DEFAULT_AGENT.to_string();
    }
    if let Some(first) = agents.first() {
        return first.name.clone();
    }
    DEFAULT_AGENT.to_string()
}

fn has_agent(agents: &[AgentMetadata], name: &str) -> bool {
    agents.iter().any(|a| a.name == name)
}

fn first_tagged(agents: &[AgentMetadata], tag: Specialization) -> Option<String> {
    agents
        .iter()
        .find(|a| a.specializations.contains(&tag))
        .map(|a| a.name.clone())
}

/// Highest count of title keywords found in any tag's keyword vocabulary,
/// among the specializations an agent actually carries.
fn best_keyword_match(chunk: &ChunkSpec, agents: &[AgentMetadata]) -> Option<String> {
    let title_words: Vec<String> = chunk
        .title
        .split_whitespace()
        .map(|w| w.to_ascii_lowercase())
        .collect();

    let mut best: Option<(usize, &str)> = None;
    for agent in agents {
        let count = agent
            .specializations
            .iter()
            .flat_map(|tag| tag.keywords())
            .filter(|kw| title_words.iter().any(|w| w.contains(*kw)))
            .count();
        let improves = match best {
            Some((best_count, _)) => count > best_count,
            None => true,
        };
        if count > 0 && improves {
            best = Some((count, agent.name.as_str()));
        }
    }
    best.map(|(_, name)| name.to_string())
}

#[cfg(test)]
#[path = "select_tests.rs"]
mod tests;
