// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chunk DAG validation (§4.10): dangling dependencies and cycles, found by
//! DFS coloring so a reported cycle names the actual path.

use crate::error::ValidationError;
use ddd_core::ChunkSpec;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Find dangling dependencies and cycles across the whole chunk set.
///
/// Dangling dependencies are reported first (in chunk order); cycle
/// detection then runs only over edges that resolve to a known chunk, so a
/// dangling edge never also surfaces as part of a reported cycle.
pub fn validate(chunks: &[ChunkSpec]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let known: HashSet<&str> = chunks.iter().map(|c| c.id.as_str()).collect();

    for chunk in chunks {
        for dep in &chunk.dependencies {
            if !known.contains(dep.as_str()) {
                errors.push(ValidationError::DanglingDependency {
                    chunk: chunk.id.as_str().to_string(),
                    dependency: dep.as_str().to_string(),
                });
            }
        }
    }

    let edges: HashMap<&str, Vec<&str>> = chunks
        .iter()
        .map(|c| {
            let deps: Vec<&str> = c
                .dependencies
                .iter()
                .map(|d| d.as_str())
                .filter(|d| known.contains(d))
                .collect();
            (c.id.as_str(), deps)
        })
        .collect();

    let mut colors: HashMap<&str, Color> = chunks.iter().map(|c| (c.id.as_str(), Color::White)).collect();
    let mut seen_cycles: HashSet<Vec<String>> = HashSet::new();

    for chunk in chunks {
        if colors[chunk.id.as_str()] == Color::White {
            let mut stack = Vec::new();
            if let Some(cycle) = visit(chunk.id.as_str(), &edges, &mut colors, &mut stack) {
                let normalized = normalize_cycle(&cycle);
                if seen_cycles.insert(normalized) {
                    errors.push(ValidationError::Cycle { path: cycle });
                }
            }
        }
    }

    errors
}

fn visit<'a>(
    node: &'a str,
    edges: &HashMap<&'a str, Vec<&'a str>>,
    colors: &mut HashMap<&'a str, Color>,
    stack: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    colors.insert(node, Color::Gray);
    stack.push(node);

    if let Some(deps) = edges.get(node) {
        for &dep in deps {
            match colors.get(dep).copied().unwrap_or(Color::Black) {
                Color::Gray => {
                    let start = stack.iter().position(|&n| n == dep).unwrap_or(0);
                    let mut path: Vec<String> = stack[start..].iter().map(|s| s.to_string()).collect();
                    path.push(dep.to_string());
                    return Some(path);
                }
                Color::White => {
                    if let Some(cycle) = visit(dep, edges, colors, stack) {
                        return Some(cycle);
                    }
                }
                Color::Black => {}
            }
        }
    }

    stack.pop();
    colors.insert(node, Color::Black);
    None
}

/// Rotate a cycle path to start at its lexicographically smallest node so
/// the same cycle found from different start points dedupes.
fn normalize_cycle(path: &[String]) -> Vec<String> {
    if path.len() <= 1 {
        return path.to_vec();
    }
    let body = &path[..path.len() - 1];
    let min_idx = body
        .iter()
        .enumerate()
        .min_by_key(|(_, n)| n.as_str())
        .map(|(i, _)| i)
        .unwrap_or(0);
    let mut rotated: Vec<String> = body[min_idx..].iter().chain(body[..min_idx].iter()).cloned().collect();
    rotated.push(rotated[0].clone());
    rotated
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
