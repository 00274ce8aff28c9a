// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The bundled `LlmClient` adapter: the extraction/triage model itself is
//! named an external collaborator (§1). This adapter shells out to a
//! configured command, writing the request as JSON on its stdin and reading
//! structured JSON back from its stdout — the same subprocess-as-boundary
//! shape this binary already uses for process liveness (`kill -0` et al.),
//! just applied to an external tool instead of a signal.

use async_trait::async_trait;
use ddd_extract::{ExtractionOutput, LlmClient, LlmError, MessageRange, TriageLine};
use serde::Serialize;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Serialize)]
struct TriageRequest<'a> {
    mode: &'static str,
    lines: &'a [TriageLine],
}

#[derive(Serialize)]
struct ExtractRequest<'a> {
    mode: &'static str,
    prompt: &'a str,
}

/// Invokes `command` (split on whitespace; first token is the executable)
/// once per call, feeding it a JSON request body and parsing its stdout as
/// the expected JSON response shape.
pub struct ExternalLlmClient {
    command: Vec<String>,
}

impl ExternalLlmClient {
    pub fn new(command: impl Into<String>) -> Self {
        let command = command
            .into()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Self { command }
    }

    async fn run(&self, body: &[u8]) -> Result<Vec<u8>, LlmError> {
        let Some((program, args)) = self.command.split_first() else {
            return Err(LlmError::Failed("no LLM command configured".to_string()));
        };
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| LlmError::Failed(format!("spawn failed: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(body)
                .await
                .map_err(|e| LlmError::Failed(format!("write to child stdin failed: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| LlmError::Failed(format!("child process failed: {e}")))?;
        if !output.status.success() {
            return Err(LlmError::Failed(format!(
                "command exited with {}",
                output.status
            )));
        }
        Ok(output.stdout)
    }
}

#[async_trait]
impl LlmClient for ExternalLlmClient {
    async fn triage(&self, lines: &[TriageLine]) -> Result<Vec<MessageRange>, LlmError> {
        let body = serde_json::to_vec(&TriageRequest { mode: "triage", lines })
            .map_err(|e| LlmError::Failed(e.to_string()))?;
        let stdout = self.run(&body).await?;
        serde_json::from_slice(&stdout).map_err(|e| LlmError::Failed(format!("malformed triage response: {e}")))
    }

    async fn extract(&self, prompt: &str) -> Result<ExtractionOutput, LlmError> {
        let body = serde_json::to_vec(&ExtractRequest { mode: "extract", prompt })
            .map_err(|e| LlmError::Failed(e.to_string()))?;
        let stdout = self.run(&body).await?;
        serde_json::from_slice(&stdout).map_err(|e| LlmError::Failed(format!("malformed extraction response: {e}")))
    }
}

#[cfg(test)]
#[path = "llm_client_tests.rs"]
mod tests;
