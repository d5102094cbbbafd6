//! Tests for content store implementations

use super::{ContentStore, GitContentStore, MemoryContentStore};
use crate::error::IterviewError;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn write_files(dir: &TempDir, files: &[(&str, &str)]) -> Vec<String> {
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    files.iter().map(|(name, _)| name.to_string()).collect()
}

fn init_git_repo(dir: &TempDir) -> bool {
    if !crate::git::is_available() {
        return false;
    }
    Command::new("git")
        .args(["init", "-q"])
        .current_dir(dir.path())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[tokio::test]
async fn test_memory_store_preserves_order_and_dedups() {
    let dir = TempDir::new().unwrap();
    let paths = write_files(&dir, &[("b.txt", "same"), ("a.txt", "other"), ("c/d.txt", "same")]);
    let store = MemoryContentStore::new();

    let hashes = store.hash_paths(dir.path(), &paths, true).await.unwrap();

    assert_eq!(hashes.len(), 3);
    assert_eq!(hashes[0], hashes[2]);
    assert_ne!(hashes[0], hashes[1]);
    assert_eq!(hashes[1], MemoryContentStore::compute_hash(b"other"));
    assert_eq!(store.blob_count(), 2);
}

#[tokio::test]
async fn test_memory_store_blocking_matches_async() {
    let dir = TempDir::new().unwrap();
    let paths = write_files(&dir, &[("x.rs", "fn x() {}"), ("y.rs", "fn y() {}")]);
    let store = MemoryContentStore::new();

    let async_hashes = store.hash_paths(dir.path(), &paths, false).await.unwrap();
    let blocking_hashes = store.hash_paths_blocking(dir.path(), &paths, false).unwrap();

    assert_eq!(async_hashes, blocking_hashes);
}

#[tokio::test]
async fn test_memory_store_write_flag() {
    let dir = TempDir::new().unwrap();
    let paths = write_files(&dir, &[("a.txt", "payload")]);
    let store = MemoryContentStore::new();

    let hashes = store.hash_paths(dir.path(), &paths, false).await.unwrap();
    assert_eq!(store.read_blob(dir.path(), &hashes[0]).await.unwrap(), None);

    store.hash_paths(dir.path(), &paths, true).await.unwrap();
    assert_eq!(
        store.read_blob(dir.path(), &hashes[0]).await.unwrap(),
        Some(b"payload".to_vec())
    );
}

#[tokio::test]
async fn test_memory_store_missing_file_fails_batch() {
    let dir = TempDir::new().unwrap();
    let mut paths = write_files(&dir, &[("a.txt", "present")]);
    paths.push("gone.txt".to_string());
    let store = MemoryContentStore::new();

    let result = store.hash_paths(dir.path(), &paths, true).await;
    assert!(matches!(result, Err(IterviewError::HashBatch { .. })));
    assert_eq!(store.blob_count(), 0);
}

#[tokio::test]
async fn test_git_store_round_trip() {
    let dir = TempDir::new().unwrap();
    if !init_git_repo(&dir) {
        return;
    }
    let paths = write_files(&dir, &[("a.txt", "x"), ("sub/b.txt", "x"), ("c.txt", "y")]);
    let store = GitContentStore::new();

    let hashes = store.hash_paths(dir.path(), &paths, true).await.unwrap();
    let blocking = store.hash_paths_blocking(dir.path(), &paths, false).unwrap();

    assert_eq!(hashes, blocking);
    assert_eq!(hashes[0], hashes[1]);
    assert_ne!(hashes[0], hashes[2]);

    let blob = store.read_blob(dir.path(), &hashes[2]).await.unwrap();
    assert_eq!(blob, Some(b"y".to_vec()));
}

#[tokio::test]
async fn test_git_store_unknown_blob_is_none() {
    let dir = TempDir::new().unwrap();
    if !init_git_repo(&dir) {
        return;
    }
    let store = GitContentStore::new();

    let missing = store
        .read_blob(dir.path(), "0123456789abcdef0123456789abcdef01234567")
        .await
        .unwrap();
    assert_eq!(missing, None);
    assert_eq!(store.read_blob(dir.path(), "not-a-hash").await.unwrap(), None);
}

#[tokio::test]
async fn test_git_store_empty_batch() {
    let dir = TempDir::new().unwrap();
    let store = GitContentStore::new();
    assert!(store.hash_paths(dir.path(), &[], true).await.unwrap().is_empty());
    assert!(store.hash_paths_blocking(dir.path(), &[], false).unwrap().is_empty());
}

#[tokio::test]
async fn test_git_store_hashes_awkward_file_names() {
    let dir = TempDir::new().unwrap();
    if !init_git_repo(&dir) {
        return;
    }
    let paths = write_files(
        &dir,
        &[
            ("plain.txt", "x"),
            ("odd\nname.txt", "x"),
            ("\"quoted\".txt", "y"),
            ("tab\there.txt", "y"),
        ],
    );
    let store = GitContentStore::new();

    let hashes = store.hash_paths(dir.path(), &paths, true).await.unwrap();
    let blocking = store.hash_paths_blocking(dir.path(), &paths, false).unwrap();

    assert_eq!(hashes.len(), 4);
    assert_eq!(hashes, blocking);
    assert_eq!(hashes[0], hashes[1]);
    assert_eq!(hashes[2], hashes[3]);
    assert_ne!(hashes[0], hashes[2]);
}
