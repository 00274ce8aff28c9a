use super::*;
use ddd_core::MemoryMetadata;
use tempfile::tempdir;

fn memory(content: &str) -> Memory {
    Memory {
        content: content.to_string(),
        category: "insight".to_string(),
        metadata: MemoryMetadata {
            session_id: "s1".to_string(),
            importance: 0.5,
            tags: vec![],
            extra: Default::default(),
        },
    }
}

#[tokio::test]
async fn save_appends_one_json_line_per_call() {
    let dir = tempdir().unwrap();
    let store = FileMemoryStore::new(dir.path().join("memories.jsonl"));
    store.save(&memory("first")).await.unwrap();
    store.save(&memory("second")).await.unwrap();

    let contents = std::fs::read_to_string(dir.path().join("memories.jsonl")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("first"));
    assert!(lines[1].contains("second"));
}

#[tokio::test]
async fn save_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let store = FileMemoryStore::new(dir.path().join("nested").join("memories.jsonl"));
    store.save(&memory("x")).await.unwrap();
    assert!(dir.path().join("nested").join("memories.jsonl").exists());
}
