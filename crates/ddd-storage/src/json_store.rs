// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generic file-backed JSON document store with advisory locking and
//! backup-on-save (§4.1).
//!
//! `load` takes a shared lock, `save` takes an exclusive lock. A missing
//! file is not an error for `load` — callers get the type's `Default`.
//! Before writing new content, `save` best-effort renames the existing file
//! to `<name>.backup`; absence of a prior file is not an error.

use crate::error::StoreError;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// A JSON document persisted at a fixed path.
pub struct JsonStore<T> {
    path: PathBuf,
    _marker: std::marker::PhantomData<T>,
}

impl<T> JsonStore<T>
where
    T: Default + Serialize + DeserializeOwned,
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

    fn backup_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".backup");
        self.path.with_file_name(name)
    }

    /// Load the document, or `T::default()` if the file does not exist.
    ///
    /// A corrupt file (invalid JSON) surfaces as [`StoreError::Corrupt`]
    /// rather than being silently treated as empty.
    pub fn load(&self) -> Result<T, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        file.lock_shared()
            .map_err(|e| StoreError::io(&self.path, e))?;
        let mut contents = String::new();
        let result = (&file)
            .read_to_string(&mut contents)
            .map_err(|e| StoreError::io(&self.path, e));
        let _ = file.unlock();
        result?;

        if contents.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&contents)
            .map_err(|e| StoreError::corrupt(&self.path, e.to_string()))
    }

    /// Write the document, renaming the prior file to `<name>.backup` first
    /// (best-effort — a missing prior file is not an error).
    pub fn save(&self, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        if self.path.exists() {
            if let Err(e) = std::fs::rename(&self.path, self.backup_path()) {
                warn!(path = %self.path.display(), error = %e, "failed to back up store before save");
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        file.lock_exclusive()
            .map_err(|e| StoreError::io(&self.path, e))?;

        let result = (|| {
            let mut json =
                serde_json::to_string_pretty(value).map_err(|e| StoreError::corrupt(&self.path, e.to_string()))?;
            json.push('\n');
            (&file)
                .write_all(json.as_bytes())
                .map_err(|e| StoreError::io(&self.path, e))
        })();
        let _ = file.unlock();
        result
    }

    /// Delete the document and its backup companion, if present.
    pub fn delete(&self) -> Result<(), StoreError> {
        for p in [self.path.clone(), self.backup_path()] {
            match std::fs::remove_file(&p) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StoreError::io(&p, e)),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "json_store_tests.rs"]
mod tests;
