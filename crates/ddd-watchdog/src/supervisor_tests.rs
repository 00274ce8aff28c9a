use super::*;
use ddd_core::ExtractionState;
use tempfile::tempdir;

fn store(dir: &std::path::Path) -> ExtractionStateStore {
    ExtractionStateStore::new(dir.join("extraction_state.json"))
}

fn spawn_sleep() -> std::io::Result<std::process::Child> {
    Command::new("sleep").arg("5").stdout(Stdio::null()).stderr(Stdio::null()).spawn()
}

#[test]
fn start_refuses_when_nothing_to_do() {
    let dir = tempdir().unwrap();
    let state_store = store(dir.path());
    let supervisor = Supervisor::new(&state_store);
    let mut called = false;
    let started = supervisor
        .start(false, || "t0".to_string(), || {
            called = true;
            spawn_sleep()
        })
        .unwrap();
    assert!(!started);
    assert!(!called);
}

#[test]
fn start_refuses_when_another_worker_is_live() {
    let dir = tempdir().unwrap();
    let state_store = store(dir.path());
    state_store
        .save(&ExtractionState::new_running(std::process::id(), "t0".into(), vec![]))
        .unwrap();
    let supervisor = Supervisor::new(&state_store);

    let started = supervisor.start(true, || "t1".to_string(), spawn_sleep).unwrap();
    assert!(!started);
}

#[test]
fn start_spawns_and_records_live_pid() {
    let dir = tempdir().unwrap();
    let state_store = store(dir.path());
    let supervisor = Supervisor::new(&state_store);

    let started = supervisor.start(true, || "t0".to_string(), spawn_sleep).unwrap();
    assert!(started);

    let state = state_store.load().unwrap().unwrap();
    let pid = state.pid.expect("pid recorded");
    assert!(process_exists(pid));
    kill_signal("-9", pid);
}

#[test]
fn start_fails_when_worker_dies_immediately() {
    let dir = tempdir().unwrap();
    let state_store = store(dir.path());
    let supervisor = Supervisor::new(&state_store);

    let result = supervisor.start(true, || "t0".to_string(), || {
        Command::new("true").stdout(Stdio::null()).stderr(Stdio::null()).spawn()
    });
    assert!(matches!(result, Err(WatchdogError::WorkerDiedImmediately)));
}

#[test]
fn status_is_idle_with_no_state() {
    let dir = tempdir().unwrap();
    let state_store = store(dir.path());
    let supervisor = Supervisor::new(&state_store);
    assert_eq!(supervisor.status().unwrap().status, WorkerStatus::Idle);
}

#[test]
fn status_is_running_with_a_live_pid() {
    let dir = tempdir().unwrap();
    let state_store = store(dir.path());
    state_store
        .save(&ExtractionState::new_running(std::process::id(), "t0".into(), vec![]))
        .unwrap();
    let supervisor = Supervisor::new(&state_store);
    assert_eq!(supervisor.status().unwrap().status, WorkerStatus::Running);
}

#[test]
fn status_is_crashed_with_a_dead_pid_still_marked_running() {
    let dir = tempdir().unwrap();
    let state_store = store(dir.path());
    // an implausibly large pid that should not correspond to a live process
    state_store
        .save(&ExtractionState::new_running(999_999, "t0".into(), vec![]))
        .unwrap();
    let supervisor = Supervisor::new(&state_store);
    assert_eq!(supervisor.status().unwrap().status, WorkerStatus::Crashed);
}

#[test]
fn status_maps_terminal_states() {
    let dir = tempdir().unwrap();
    let state_store = store(dir.path());
    let mut state = ExtractionState::new_running(999_999, "t0".into(), vec![]);
    state.finish(ddd_core::RunStatus::Completed, "t1".into());
    state_store.save(&state).unwrap();
    let supervisor = Supervisor::new(&state_store);
    assert_eq!(supervisor.status().unwrap().status, WorkerStatus::Completed);

    let mut state = ExtractionState::new_running(999_999, "t0".into(), vec![]);
    state.finish(ddd_core::RunStatus::CompletedWithErrors, "t1".into());
    state_store.save(&state).unwrap();
    assert_eq!(supervisor.status().unwrap().status, WorkerStatus::Failed);
}

#[test]
fn stop_with_no_state_is_success() {
    let dir = tempdir().unwrap();
    let state_store = store(dir.path());
    let supervisor = Supervisor::new(&state_store);
    assert!(supervisor.stop(|| "t0".to_string()).unwrap());
}

#[test]
fn stop_kills_a_live_worker() {
    let dir = tempdir().unwrap();
    let state_store = store(dir.path());
    let supervisor = Supervisor::new(&state_store);
    supervisor.start(true, || "t0".to_string(), spawn_sleep).unwrap();
    let pid = state_store.load().unwrap().unwrap().pid.unwrap();

    assert!(supervisor.stop(|| "t1".to_string()).unwrap());
    assert!(!process_exists(pid));
    let state = state_store.load().unwrap().unwrap();
    assert_eq!(state.status, ddd_core::RunStatus::Cancelled);
    assert!(state.pid.is_none());
}

#[test]
fn cleanup_state_refuses_while_running() {
    let dir = tempdir().unwrap();
    let state_store = store(dir.path());
    state_store
        .save(&ExtractionState::new_running(std::process::id(), "t0".into(), vec![]))
        .unwrap();
    let supervisor = Supervisor::new(&state_store);
    assert!(!supervisor.cleanup_state().unwrap());
}

#[test]
fn cleanup_state_clears_terminal_state() {
    let dir = tempdir().unwrap();
    let state_store = store(dir.path());
    let mut state = ExtractionState::new_running(999_999, "t0".into(), vec![]);
    state.finish(ddd_core::RunStatus::Completed, "t1".into());
    state_store.save(&state).unwrap();
    let supervisor = Supervisor::new(&state_store);
    assert!(supervisor.cleanup_state().unwrap());
    assert!(state_store.load().unwrap().is_none());
}
