use super::*;
use tempfile::tempdir;

fn config(dir: &std::path::Path) -> Config {
    Config {
        workspace_root: dir.to_path_buf(),
        max_tokens: 200_000,
        memory_system_enabled: false,
    }
}

fn write_plan(dir: &std::path::Path) {
    std::fs::write(
        dir.join("ai_working").join("ddd").join("code_plan.md"),
        "Chunk 1.1: First step (~10 lines)\nFiles: a.rs\n",
    )
    .unwrap();
}

#[tokio::test]
async fn resume_without_a_checkpoint_is_an_error() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path());
    std::fs::create_dir_all(cfg.ai_working_dir()).unwrap();
    write_plan(dir.path());

    let result = run(&cfg).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn resume_after_start_completes_again_idempotently() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path());
    std::fs::create_dir_all(cfg.ai_working_dir()).unwrap();
    write_plan(dir.path());

    crate::commands::start::run(&cfg, Some(cfg.default_plan_path())).unwrap();
    let result = run(&cfg).await;
    assert!(result.is_ok());
}
