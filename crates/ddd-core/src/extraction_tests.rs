use super::*;

#[test]
fn new_running_sets_pid_and_status() {
    let state = ExtractionState::new_running(
        42,
        "t0".into(),
        vec![TranscriptState::pending("a"), TranscriptState::pending("b")],
    );
    assert_eq!(state.status, RunStatus::Running);
    assert_eq!(state.pid, Some(42));
    assert_eq!(state.transcripts.len(), 2);
}

#[test]
fn finish_clears_pid() {
    let mut state = ExtractionState::new_running(42, "t0".into(), vec![]);
    state.finish(RunStatus::Completed, "t1".into());
    assert_eq!(state.status, RunStatus::Completed);
    assert!(state.pid.is_none());
    assert_eq!(state.last_update, "t1");
}

#[test]
fn counts_completed_and_failed() {
    let mut state = ExtractionState::new_running(
        1,
        "t0".into(),
        vec![
            TranscriptState::pending("a"),
            TranscriptState::pending("b"),
            TranscriptState::pending("c"),
        ],
    );
    state.transcripts[0].status = TranscriptStatus::Completed;
    state.transcripts[0].memories = 3;
    state.transcripts[1].status = TranscriptStatus::Failed;
    assert_eq!(state.completed_count(), 1);
    assert_eq!(state.failed_count(), 1);
    assert_eq!(state.total_memories(), 3);
}

#[test]
fn round_trips_through_json() {
    let state = ExtractionState::new_running(7, "t0".into(), vec![TranscriptState::pending("a")]);
    let json = serde_json::to_string(&state).unwrap();
    let back: ExtractionState = serde_json::from_str(&json).unwrap();
    assert_eq!(state, back);
}
