use evreg_storage::*;
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;

async fn connect(temp: &TempDir) -> Storage {
    Storage::builder().root(temp.path()).connect().await.unwrap()
}

#[tokio::test]
async fn test_path_traversal_blocked() {
    let temp = TempDir::new().unwrap();
    let storage = connect(&temp).await;

    assert!(storage.resolve("../etc/passwd").is_err());
    assert!(storage.resolve("foo/../../bar").is_err());
    assert!(storage.resolve("/etc/passwd").is_err());
}

#[tokio::test]
async fn test_write_read_delete() {
    let temp = TempDir::new().unwrap();
    let storage = connect(&temp).await;

    storage.write("nested/events.json", b"[]").await.unwrap();
    assert!(storage.exists("nested/events.json").unwrap());
    assert_eq!(storage.read("nested/events.json").await.unwrap(), b"[]");

    storage.delete("nested/events.json").await.unwrap();
    assert!(!storage.exists("nested/events.json").unwrap());
    assert!(matches!(
        storage.read("nested/events.json").await,
        Err(StorageError::FileNotFound { .. })
    ));
}

#[tokio::test]
async fn test_overwrite_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let storage = connect(&temp).await;

    storage.write("registrations.json", b"[1]").await.unwrap();
    storage.write("registrations.json", b"[1,2]").await.unwrap();

    assert_eq!(storage.read("registrations.json").await.unwrap(), b"[1,2]");
    let leftovers: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().contains(".evregtmp."))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_connect_without_create_requires_existing_root() {
    let temp = TempDir::new().unwrap();
    let result = Storage::builder().root(temp.path().join("absent")).create(false).connect().await;
    assert!(matches!(result, Err(StorageError::Io { .. })));
}

#[tokio::test]
async fn test_collection_survives_reconnect() {
    let temp = TempDir::new().unwrap();

    {
        let events: Collection<Value> =
            Collection::new(connect(&temp).await, "events.json", LoadPolicy::Strict);
        let guard = events.lock().await;
        guard.save(&[json!({ "name": "Chess", "enabled": true })]).await.unwrap();
    }

    let events: Collection<Value> =
        Collection::new(connect(&temp).await, "events.json", LoadPolicy::Strict);
    let loaded = events.load().await.unwrap();
    assert_eq!(loaded, vec![json!({ "name": "Chess", "enabled": true })]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_locked_appends_are_not_lost() {
    let temp = TempDir::new().unwrap();
    let regs: Arc<Collection<Value>> =
        Arc::new(Collection::new(connect(&temp).await, "registrations.json", LoadPolicy::Strict));

    let mut tasks = Vec::new();
    for i in 0..16 {
        let regs = Arc::clone(&regs);
        tasks.push(tokio::spawn(async move {
            let guard = regs.lock().await;
            let mut items = guard.load().await.unwrap();
            items.push(json!({ "studentId": format!("{i:012}") }));
            guard.save(&items).await.unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(regs.load().await.unwrap().len(), 16);
}
