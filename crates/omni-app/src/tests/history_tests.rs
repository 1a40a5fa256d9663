use std::fs;

use tempfile::TempDir;

use super::{entry, record};
use crate::history::HistoryStorage;

#[test]
fn test_missing_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let storage = HistoryStorage::new(dir.path().join("history.json"));

    assert!(storage.try_load().unwrap().is_empty());
    assert!(storage.load().is_empty());
}

#[tokio::test]
async fn test_saved_history_reloads() {
    let dir = TempDir::new().unwrap();
    let storage = HistoryStorage::new(dir.path().join("history.json"));

    let mut first = entry("exception", "例外");
    first.dictionary = Some(record("exception", "someone or something that is not included"));
    let history = vec![first, entry("你好", "hello")];

    storage.try_save(&history).await.unwrap();

    assert_eq!(storage.try_load().unwrap(), history);
}

#[tokio::test]
async fn test_file_is_pretty_utf8_json() {
    let dir = TempDir::new().unwrap();
    let storage = HistoryStorage::new(dir.path().join("history.json"));

    storage.save(&[entry("你好", "hello")]).await;

    let data = fs::read_to_string(storage.path()).unwrap();
    assert!(data.starts_with("[\n"));
    assert!(data.contains("\"input\": \"你好\""));
}

#[test]
fn test_corrupt_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    fs::write(&path, "not json").unwrap();

    let storage = HistoryStorage::new(&path);

    assert!(storage.try_load().is_err());
    assert!(storage.load().is_empty());
}

#[tokio::test]
async fn test_failed_save_is_logged_not_raised() {
    let dir = TempDir::new().unwrap();
    let storage = HistoryStorage::new(dir.path().join("missing").join("history.json"));

    assert!(storage.try_save(&[entry("hello", "你好")]).await.is_err());
    storage.save(&[entry("hello", "你好")]).await;
    assert!(storage.load().is_empty());
}
