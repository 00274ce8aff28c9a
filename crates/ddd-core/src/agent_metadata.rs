// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker-role descriptor discovered by the agent selector (§3, §4.12).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Specialization tags derived from keyword matches against a descriptor's
/// `description` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialization {
    Testing,
    Architecture,
    Implementation,
    Debugging,
    Integration,
    Review,
    Analysis,
}

impl Specialization {
    pub const ALL: [Specialization; 7] = [
        Specialization::Testing,
        Specialization::Architecture,
        Specialization::Implementation,
        Specialization::Debugging,
        Specialization::Integration,
        Specialization::Review,
        Specialization::Analysis,
    ];

    /// Keyword vocabulary used to match a descriptor's free-text description
    /// against this tag (§4.12).
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Specialization::Testing => &["test", "testing", "tdd", "coverage"],
            Specialization::Architecture => &["architect", "design", "structure", "pattern"],
            Specialization::Implementation => &["implement", "build", "feature", "code"],
            Specialization::Debugging => &["debug", "fix", "bug", "troubleshoot"],
            Specialization::Integration => &["integrate", "integration", "wire", "connect"],
            Specialization::Review => &["review", "audit", "critique"],
            Specialization::Analysis => &["analyze", "analysis", "investigate", "research"],
        }
    }
}

/// A discovered worker-role descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMetadata {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub specializations: Vec<Specialization>,
    pub location: PathBuf,
}

#[cfg(test)]
#[path = "agent_metadata_tests.rs"]
mod tests;
