// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `get_next` (§4.10): the first not-yet-completed chunk whose dependencies
//! are all satisfied, in plan order.

use ddd_core::{ChunkId, ChunkSpec};
use std::collections::HashSet;

pub fn get_next<'a>(chunks: &'a [ChunkSpec], completed: &HashSet<ChunkId>) -> Option<&'a ChunkSpec> {
    chunks.iter().find(|chunk| {
        !completed.contains(&chunk.id) && chunk.dependencies.iter().all(|dep| completed.contains(dep))
    })
}

#[cfg(test)]
#[path = "next_tests.rs"]
mod tests;
