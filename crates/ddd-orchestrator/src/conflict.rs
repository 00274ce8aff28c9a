// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conflict detector (§4.13): compares a checkpoint's recorded file state
//! against the working tree and source-control history. Unavailable
//! source-control (missing binary, no repo, timeout) degrades to "no
//! conflicts" rather than failing resume.

use chrono::{DateTime, Utc};
use ddd_core::Checkpoint;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

const GIT_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_NAMED_PER_KIND: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Modified,
    Deleted,
    Created,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileConflict {
    pub path: PathBuf,
    pub checkpoint_ts: String,
    pub last_modified: String,
    pub kind: ConflictKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConflictReport {
    pub has_conflicts: bool,
    pub conflicts: Vec<FileConflict>,
    pub recommendations: Vec<String>,
}

pub async fn check(checkpoint: &Checkpoint, repo_root: &Path) -> ConflictReport {
    let checkpoint_time = checkpoint.timestamp.parse::<DateTime<Utc>>().ok();
    let mut conflicts = Vec::new();

    for path in &checkpoint.files_modified {
        let absolute = repo_root.join(path);
        if !absolute.exists() {
            conflicts.push(FileConflict {
                path: path.clone(),
                checkpoint_ts: checkpoint.timestamp.clone(),
                last_modified: String::new(),
                kind: ConflictKind::Deleted,
            });
            continue;
        }

        if let Some(last_commit) = last_commit_time(repo_root, path).await {
            if let Some(checkpoint_time) = checkpoint_time {
                if last_commit > checkpoint_time {
                    conflicts.push(FileConflict {
                        path: path.clone(),
                        checkpoint_ts: checkpoint.timestamp.clone(),
                        last_modified: last_commit.to_rfc3339(),
                        kind: ConflictKind::Modified,
                    });
                }
            }
        }
    }

    if let Some(untracked) = untracked_and_added(repo_root).await {
        for (path, modified) in untracked {
            if checkpoint.files_modified.contains(&path) {
                continue;
            }
            let is_new = match (checkpoint_time, modified) {
                (Some(checkpoint_time), Some(modified)) => modified > checkpoint_time,
                _ => true,
            };
            if is_new {
                conflicts.push(FileConflict {
                    path: path.clone(),
                    checkpoint_ts: checkpoint.timestamp.clone(),
                    last_modified: modified.map(|m| m.to_rfc3339()).unwrap_or_default(),
                    kind: ConflictKind::Created,
                });
            }
        }
    }

    let recommendations = recommendations_for(&conflicts);
    ConflictReport {
        has_conflicts: !conflicts.is_empty(),
        conflicts,
        recommendations,
    }
}

async fn last_commit_time(repo_root: &Path, path: &Path) -> Option<DateTime<Utc>> {
    let output = run_git(
        repo_root,
        &["log", "-1", "--format=%aI", "--", &path.to_string_lossy()],
    )
    .await?;
    let text = String::from_utf8(output).ok()?;
    text.trim().parse::<DateTime<Utc>>().ok()
}

async fn untracked_and_added(repo_root: &Path) -> Option<Vec<(PathBuf, Option<DateTime<Utc>>)>> {
    let output = run_git(repo_root, &["status", "--porcelain"]).await?;
    let text = String::from_utf8(output).ok()?;

    let mut result = Vec::new();
    for line in text.lines() {
        if line.len() < 4 {
            continue;
        }
        let status = &line[..2];
        let is_new = status.contains('?') || status.starts_with('A');
        if !is_new {
            continue;
        }
        let path = PathBuf::from(line[3..].trim());
        let modified = std::fs::metadata(repo_root.join(&path))
            .ok()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from);
        result.push((path, modified));
    }
    Some(result)
}

async fn run_git(repo_root: &Path, args: &[&str]) -> Option<Vec<u8>> {
    let future = Command::new("git").args(args).current_dir(repo_root).output();
    match tokio::time::timeout(GIT_TIMEOUT, future).await {
        Ok(Ok(output)) if output.status.success() => Some(output.stdout),
        _ => None,
    }
}

fn recommendations_for(conflicts: &[FileConflict]) -> Vec<String> {
    if conflicts.is_empty() {
        return Vec::new();
    }

    let mut recs = Vec::new();
    for kind in [ConflictKind::Modified, ConflictKind::Deleted, ConflictKind::Created] {
        let matching: Vec<&FileConflict> = conflicts.iter().filter(|c| c.kind == kind).collect();
        if matching.is_empty() {
            continue;
        }
        let names: Vec<String> = matching
            .iter()
            .take(MAX_NAMED_PER_KIND)
            .map(|c| c.path.display().to_string())
            .collect();
        let label = match kind {
            ConflictKind::Modified => "modified",
            ConflictKind::Deleted => "deleted",
            ConflictKind::Created => "created",
        };
        recs.push(format!(
            "{} file(s) {label} since the checkpoint: {}",
            matching.len(),
            names.join(", "),
        ));
    }
    recs.push("review these files before resuming, or start a fresh session".to_string());
    recs
}

#[cfg(test)]
#[path = "conflict_tests.rs"]
mod tests;
