use super::*;
use tempfile::tempdir;

fn config(dir: &std::path::Path) -> Config {
    Config {
        workspace_root: dir.to_path_buf(),
        max_tokens: 1,
        memory_system_enabled: false,
    }
}

#[test]
fn latest_log_picks_the_lexicographically_last_file() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path()).unwrap();
    std::fs::write(dir.path().join("extraction_20260101_000000.log"), "old").unwrap();
    std::fs::write(dir.path().join("extraction_20260102_000000.log"), "new").unwrap();

    let latest = latest_log(dir.path()).unwrap();
    assert!(latest.ends_with("extraction_20260102_000000.log"));
}

#[test]
fn latest_log_errors_when_directory_is_empty() {
    let dir = tempdir().unwrap();
    assert!(latest_log(dir.path()).is_err());
}

#[test]
fn run_with_explicit_timestamp_reads_that_file() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path());
    let path = ddd_watchdog::log_path(&cfg.memories_dir(), "20260101_000000");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "hello").unwrap();

    assert!(run(&cfg, Some("20260101_000000".to_string()), false).is_ok());
}
