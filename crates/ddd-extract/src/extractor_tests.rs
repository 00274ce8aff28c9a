use super::*;
use crate::llm::{LlmError, RawMemory};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

struct FakeClient {
    ranges: Vec<MessageRange>,
    fail_triage: bool,
    delay: Option<Duration>,
    triage_calls: AtomicUsize,
}

impl FakeClient {
    fn new(ranges: Vec<MessageRange>) -> Self {
        Self {
            ranges,
            fail_triage: false,
            delay: None,
            triage_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn triage(&self, _lines: &[crate::filter::TriageLine]) -> Result<Vec<MessageRange>, LlmError> {
        self.triage_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_triage {
            return Err(LlmError::Failed("boom".into()));
        }
        Ok(self.ranges.clone())
    }

    async fn extract(&self, prompt: &str) -> Result<ExtractionOutput, LlmError> {
        Ok(ExtractionOutput {
            memories: vec![RawMemory {
                memory_type: "fact".into(),
                content: format!("len={}", prompt.len()),
                importance: 0.5,
                tags: vec![],
            }],
            key_learnings: vec![],
            decisions_made: vec![],
            issues_solved: vec![],
        })
    }
}

fn messages(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| json!({"role": if i % 2 == 0 {"user"} else {"assistant"}, "content": format!("message {i}")}))
        .collect()
}

#[tokio::test]
async fn empty_input_is_rejected() {
    let client = FakeClient::new(vec![]);
    let err = two_pass(&[], &client).await.unwrap_err();
    assert!(matches!(err, ExtractError::EmptyInput));
}

#[tokio::test]
async fn uses_triage_ranges_when_present() {
    let msgs = messages(10);
    let client = FakeClient::new(vec![MessageRange { start: 2, end: 5, reason: "interesting".into() }]);
    let result = two_pass(&msgs, &client).await.unwrap();
    assert_eq!(result.metadata.ranges_identified, 1);
    assert_eq!(result.metadata.processed_messages, 3);
    assert_eq!(result.metadata.total_messages, 10);
    assert!((result.metadata.coverage - 0.3).abs() < 1e-9);
    assert_eq!(result.metadata.extraction_method, "two_pass_intelligent");
}

#[tokio::test]
async fn falls_back_to_last_50_when_triage_returns_nothing() {
    let msgs = messages(60);
    let client = FakeClient::new(vec![]);
    let result = two_pass(&msgs, &client).await.unwrap();
    assert_eq!(result.metadata.processed_messages, 50);
    assert_eq!(result.metadata.ranges_identified, 1);
}

#[tokio::test]
async fn falls_back_when_triage_errors() {
    let msgs = messages(10);
    let mut client = FakeClient::new(vec![]);
    client.fail_triage = true;
    let result = two_pass(&msgs, &client).await.unwrap();
    assert_eq!(result.metadata.processed_messages, 10);
}

#[tokio::test(start_paused = true)]
async fn falls_back_when_triage_times_out() {
    let msgs = messages(5);
    let mut client = FakeClient::new(vec![MessageRange { start: 0, end: 5, reason: "slow".into() }]);
    client.delay = Some(Duration::from_secs(31));
    let result = two_pass(&msgs, &client).await.unwrap();
    assert_eq!(result.metadata.processed_messages, 5);
    assert_eq!(result.metadata.ranges_identified, 1);
}

#[tokio::test]
async fn caps_triage_ranges_at_five() {
    let msgs = messages(20);
    let ranges: Vec<MessageRange> = (0..8)
        .map(|i| MessageRange { start: i, end: i + 1, reason: "r".into() })
        .collect();
    let client = FakeClient::new(ranges);
    let result = two_pass(&msgs, &client).await.unwrap();
    assert_eq!(result.metadata.ranges_identified, 5);
}
