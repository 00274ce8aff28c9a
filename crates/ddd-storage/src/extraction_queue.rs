// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Extraction queue: `.data/extraction_queue.jsonl` (§6, §3 QueuedExtraction).
//! Populated by the event router (§4.3); drained by the extraction worker
//! (§4.7), which removes each item on success and rewrites it with an
//! incremented retry count on failure.

use crate::error::StoreError;
use crate::queue::JsonlQueue;
use ddd_core::QueuedExtraction;
use std::path::PathBuf;

pub struct ExtractionQueue {
    queue: JsonlQueue<QueuedExtraction>,
}

impl ExtractionQueue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            queue: JsonlQueue::new(path),
        }
    }

    pub fn enqueue(&self, item: &QueuedExtraction) -> Result<(), StoreError> {
        self.queue.append(item)
    }

    pub fn all(&self) -> Result<Vec<QueuedExtraction>, StoreError> {
        self.queue.read_all()
    }

    /// Remove the item matching `session_id`/`transcript_path` after a
    /// successful extraction.
    pub fn complete(
        &self,
        session_id: &str,
        transcript_path: &std::path::Path,
    ) -> Result<(), StoreError> {
        self.queue.retain(|item| {
            !(item.session_id.as_str() == session_id && item.transcript_path == transcript_path)
        })
    }

    /// Replace a failed item's retry count and error message in place.
    pub fn record_failure(
        &self,
        session_id: &str,
        transcript_path: &std::path::Path,
        error: String,
    ) -> Result<(), StoreError> {
        let items = self.queue.read_all()?;
        let updated: Vec<QueuedExtraction> = items
            .into_iter()
            .map(|mut item| {
                if item.session_id.as_str() == session_id && item.transcript_path == transcript_path
                {
                    item.record_failure(error.clone());
                }
                item
            })
            .collect();
        self.queue.retain(|_| false)?;
        for item in &updated {
            self.queue.append(item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "extraction_queue_tests.rs"]
mod tests;
