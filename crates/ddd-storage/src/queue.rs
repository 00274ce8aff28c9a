// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only JSONL queue store (§4.1, §3 QueuedExtraction).
//!
//! `append` holds an exclusive lock for the duration of the write.
//! `remove` rewrites the file excluding matching records, also under an
//! exclusive lock, so a concurrent `append` in the same process never
//! interleaves with a rewrite.

use crate::error::StoreError;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct JsonlQueue<T> {
    path: PathBuf,
    _marker: std::marker::PhantomData<T>,
}

impl<T> JsonlQueue<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: std::marker::PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a new line.
    pub fn append(&self, record: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        file.lock_exclusive()
            .map_err(|e| StoreError::io(&self.path, e))?;
        let result = (|| {
            let line = serde_json::to_string(record)
                .map_err(|e| StoreError::corrupt(&self.path, e.to_string()))?;
            (&file)
                .write_all(line.as_bytes())
                .and_then(|_| (&file).write_all(b"\n"))
                .map_err(|e| StoreError::io(&self.path, e))
        })();
        let _ = file.unlock();
        result
    }

    /// Read every record currently in the queue. Lines that fail to parse
    /// are skipped with a warning rather than failing the whole read —
    /// the queue is an at-least-once delivery log, not a strict schema.
    pub fn read_all(&self) -> Result<Vec<T>, StoreError> {
        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        file.lock_shared()
            .map_err(|e| StoreError::io(&self.path, e))?;
        let reader = BufReader::new(&file);
        let mut out = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| StoreError::io(&self.path, e))?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str(trimmed) {
                Ok(record) => out.push(record),
                Err(e) => warn!(path = %self.path.display(), error = %e, "skipping malformed queue line"),
            }
        }
        let _ = file.unlock();
        Ok(out)
    }

    /// Rewrite the queue, keeping only records for which `keep` returns
    /// `true`. Used to remove a record after successful processing.
    pub fn retain<F>(&self, keep: F) -> Result<(), StoreError>
    where
        F: Fn(&T) -> bool,
    {
        let records = self.read_all()?;
        let remaining: Vec<T> = records.into_iter().filter(keep).collect();

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        file.lock_exclusive()
            .map_err(|e| StoreError::io(&self.path, e))?;
        let result = (|| {
            for record in &remaining {
                let line = serde_json::to_string(record)
                    .map_err(|e| StoreError::corrupt(&self.path, e.to_string()))?;
                (&file)
                    .write_all(line.as_bytes())
                    .and_then(|_| (&file).write_all(b"\n"))
                    .map_err(|e| StoreError::io(&self.path, e))?;
            }
            Ok(())
        })();
        let _ = file.unlock();
        result
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
