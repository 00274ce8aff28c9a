use super::*;
use ddd_storage::CircuitStore;
use tempfile::tempdir;

fn breaker(dir: &std::path::Path) -> CircuitBreaker {
    CircuitBreaker::new(CircuitStore::new(dir.join("circuit_breaker_state.json")))
}

#[test]
fn subagent_stop_skips_before_consuming_breaker_budget() {
    let dir = tempdir().unwrap();
    let breaker = breaker(dir.path());
    for _ in 0..10 {
        let decision = route("SubagentStop", &breaker, 1000).unwrap();
        assert_eq!(
            decision,
            RouteDecision::Skip {
                reason: "incomplete context".to_string()
            }
        );
    }
    // breaker budget untouched: a Stop event right after is still admitted
    assert_eq!(route("Stop", &breaker, 1000).unwrap(), RouteDecision::Queue);
}

#[test]
fn stop_queues_when_breaker_admits() {
    let dir = tempdir().unwrap();
    let breaker = breaker(dir.path());
    assert_eq!(route("Stop", &breaker, 1000).unwrap(), RouteDecision::Queue);
}

#[test]
fn stop_skips_when_breaker_denies() {
    let dir = tempdir().unwrap();
    let breaker = breaker(dir.path());
    for i in 0..5 {
        breaker.admit(1000 + i).unwrap();
    }
    let decision = route("Stop", &breaker, 1004).unwrap();
    assert!(matches!(decision, RouteDecision::Skip { .. }));
}

#[test]
fn unknown_event_is_skipped() {
    let dir = tempdir().unwrap();
    let breaker = breaker(dir.path());
    let decision = route("PreToolUse", &breaker, 1000).unwrap();
    assert_eq!(
        decision,
        RouteDecision::Skip {
            reason: "unknown event: PreToolUse".to_string()
        }
    );
}
