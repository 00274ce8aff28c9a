// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use ddd_plan::{PlanError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("plan failed validation:\n{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("no checkpoint to resume from")]
    NoCheckpoint,

    #[error("conflicts detected in working tree, resume blocked:\n{}", .0.join("\n"))]
    Conflicts(Vec<String>),

    #[error(transparent)]
    Store(#[from] ddd_storage::StoreError),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}
