// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The memory store boundary (§1): the actual memory store implementation
//! is an external collaborator. This crate depends only on [`MemoryStore`];
//! the concrete store (file-backed, vector, or otherwise) lives outside
//! this workspace.

use async_trait::async_trait;
use ddd_core::Memory;

#[async_trait]
pub trait MemoryStore: Send + Sync {
    async fn save(&self, memory: &Memory) -> Result<(), String>;
}
