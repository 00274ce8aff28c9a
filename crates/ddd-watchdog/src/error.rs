// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchdogError {
    #[error("store error: {0}")]
    Store(#[from] ddd_storage::StoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("worker died immediately after spawn")]
    WorkerDiedImmediately,
}
