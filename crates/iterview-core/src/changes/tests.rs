//! Tests for change detection

use super::{Change, ChangeDetector, ChangeStatus, changes_between, sort_changes};
use crate::manifest::{Manifest, RepoSnapshot};
use crate::repo::WalkFileLister;
use crate::store::{ContentStore, MemoryContentStore};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn hash(content: &str) -> String {
    MemoryContentStore::compute_hash(content.as_bytes())
}

fn snapshot(files: &[(&str, &str)]) -> RepoSnapshot {
    RepoSnapshot::from_pairs(
        files
            .iter()
            .map(|(path, content)| (path.to_string(), hash(content))),
    )
}

fn make_repo(root: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let repo = root.join(name);
    fs::create_dir_all(repo.join(".git")).unwrap();
    for (path, content) in files {
        let full = repo.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
    repo
}

fn detector() -> ChangeDetector {
    ChangeDetector::new(
        Arc::new(MemoryContentStore::new()),
        Arc::new(WalkFileLister::new()),
    )
}

fn summary(changes: &[Change]) -> Vec<(&str, ChangeStatus)> {
    changes.iter().map(|c| (c.path.as_str(), c.status)).collect()
}

#[test]
fn test_status_order_and_display() {
    assert!(ChangeStatus::Modified < ChangeStatus::Added);
    assert!(ChangeStatus::Added < ChangeStatus::Deleted);
    assert_eq!(ChangeStatus::Deleted.to_string(), "deleted");
    assert_eq!(format!("{:#}", ChangeStatus::Added), "A");
    assert_eq!(
        serde_json::to_string(&ChangeStatus::Modified).unwrap(),
        "\"modified\""
    );
}

#[test]
fn test_change_hash_invariants() {
    let m = Change::modified("/r", "a", "1", "2");
    assert!(m.is_modified() && m.old_hash.is_some() && m.new_hash.is_some());

    let a = Change::added("/r", "a", "2");
    assert!(a.is_added() && a.old_hash.is_none() && a.new_hash.is_some());

    let d = Change::deleted("/r", "a", "1");
    assert!(d.is_deleted() && d.old_hash.is_some() && d.new_hash.is_none());
    assert_eq!(d.absolute_path(), PathBuf::from("/r/a"));
}

#[test]
fn test_sort_changes() {
    let mut changes = vec![
        Change::deleted("/r", "a.txt", "1"),
        Change::added("/r", "z.txt", "2"),
        Change::modified("/r", "m.txt", "1", "2"),
        Change::added("/r", "b.txt", "3"),
        Change::modified("/q", "m.txt", "1", "2"),
    ];
    sort_changes(&mut changes);

    let order: Vec<(&str, &str)> = changes
        .iter()
        .map(|c| (c.repository.to_str().unwrap(), c.path.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("/q", "m.txt"),
            ("/r", "m.txt"),
            ("/r", "b.txt"),
            ("/r", "z.txt"),
            ("/r", "a.txt"),
        ]
    );
}

#[test]
fn test_changes_between_identical_content_is_unchanged() {
    let a = Manifest::new(1, "/w").with_repository("/w/r", snapshot(&[("a.txt", "x")]));
    let b = Manifest::new(2, "/w").with_repository(
        "/w/r",
        snapshot(&[("a.txt", "x"), ("b.txt", "y")]),
    );

    let changes = changes_between(&a, &b);
    assert_eq!(summary(&changes), vec![("b.txt", ChangeStatus::Added)]);
}

#[test]
fn test_changes_between_is_symmetric() {
    let a = Manifest::new(1, "/w").with_repository(
        "/w/r",
        snapshot(&[("only_a.txt", "1"), ("both.txt", "old")]),
    );
    let b = Manifest::new(2, "/w").with_repository(
        "/w/r",
        snapshot(&[("only_b.txt", "2"), ("both.txt", "new")]),
    );

    assert_eq!(
        summary(&changes_between(&a, &b)),
        vec![
            ("both.txt", ChangeStatus::Modified),
            ("only_b.txt", ChangeStatus::Added),
            ("only_a.txt", ChangeStatus::Deleted),
        ]
    );
    assert_eq!(
        summary(&changes_between(&b, &a)),
        vec![
            ("both.txt", ChangeStatus::Modified),
            ("only_a.txt", ChangeStatus::Added),
            ("only_b.txt", ChangeStatus::Deleted),
        ]
    );
}

#[test]
fn test_changes_between_covers_repository_union() {
    let a = Manifest::new(1, "/w").with_repository("/w/old", snapshot(&[("a.txt", "x")]));
    let b = Manifest::new(2, "/w").with_repository("/w/new", snapshot(&[("b.txt", "y")]));

    let changes = changes_between(&a, &b);
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0], Change::added("/w/new", "b.txt", hash("y")));
    assert_eq!(changes[1], Change::deleted("/w/old", "a.txt", hash("x")));
}

#[test]
fn test_changes_since_live_edits() {
    let temp = TempDir::new().unwrap();
    let repo = make_repo(temp.path(), "app", &[("a.txt", "x"), ("b.txt", "y")]);
    let manifest = Manifest::new(1, temp.path())
        .with_repository(&repo, snapshot(&[("a.txt", "x"), ("b.txt", "y")]));

    fs::write(repo.join("a.txt"), "z").unwrap();
    fs::remove_file(repo.join("b.txt")).unwrap();
    fs::write(repo.join("c.txt"), "w").unwrap();

    let detector = detector();
    let changes = detector.changes_since(&manifest, &[repo.clone()], temp.path());
    assert_eq!(
        changes,
        vec![
            Change::modified(&repo, "a.txt", hash("x"), hash("z")),
            Change::added(&repo, "c.txt", hash("w")),
            Change::deleted(&repo, "b.txt", hash("y")),
        ]
    );

    // No mutation in between: same answer
    assert_eq!(
        detector.changes_since(&manifest, &[repo.clone()], temp.path()),
        changes
    );
}

#[test]
fn test_changes_since_unchanged_is_empty() {
    let temp = TempDir::new().unwrap();
    let repo = make_repo(temp.path(), "app", &[("a.txt", "x")]);
    let manifest =
        Manifest::new(1, temp.path()).with_repository(&repo, snapshot(&[("a.txt", "x")]));

    assert!(
        detector()
            .changes_since(&manifest, &[repo], temp.path())
            .is_empty()
    );
}

#[test]
fn test_changes_since_reports_new_repository() {
    let temp = TempDir::new().unwrap();
    let old = make_repo(temp.path(), "old", &[("a.txt", "x")]);
    let new = make_repo(temp.path(), "new", &[("lib.rs", "fn main() {}")]);
    let manifest =
        Manifest::new(1, temp.path()).with_repository(&old, snapshot(&[("a.txt", "x")]));

    let changes = detector().changes_since(&manifest, &[new.clone(), old], temp.path());
    assert_eq!(changes, vec![Change::added(&new, "lib.rs", hash("fn main() {}"))]);
}

#[test]
fn test_changes_since_removed_repository_is_deleted() {
    let temp = TempDir::new().unwrap();
    let gone = temp.path().join("gone");
    let manifest = Manifest::new(1, temp.path())
        .with_repository(&gone, snapshot(&[("a.txt", "x"), ("b.txt", "y")]));

    let changes = detector().changes_since(&manifest, &[], temp.path());
    assert_eq!(
        summary(&changes),
        vec![("a.txt", ChangeStatus::Deleted), ("b.txt", ChangeStatus::Deleted)]
    );
}

#[test]
fn test_changes_since_ignores_storage_dir() {
    let temp = TempDir::new().unwrap();
    let repo = make_repo(temp.path(), "app", &[("a.txt", "x")]);
    let manifest =
        Manifest::new(1, temp.path()).with_repository(&repo, snapshot(&[("a.txt", "x")]));
    let storage = repo.join(".iterview");
    fs::create_dir_all(storage.join("manifests")).unwrap();
    fs::write(storage.join("manifests/checkpoint-1.json"), "{}").unwrap();

    assert!(
        detector()
            .changes_since(&manifest, &[repo], &storage)
            .is_empty()
    );
}

#[tokio::test]
async fn test_changes_since_does_not_store_blobs() {
    let temp = TempDir::new().unwrap();
    let repo = make_repo(temp.path(), "app", &[("a.txt", "changed")]);
    let manifest =
        Manifest::new(1, temp.path()).with_repository(&repo, snapshot(&[("a.txt", "x")]));
    let store = Arc::new(MemoryContentStore::new());
    let detector = ChangeDetector::new(store.clone(), Arc::new(WalkFileLister::new()));

    let changes = detector.changes_since(&manifest, &[repo.clone()], temp.path());
    assert_eq!(changes.len(), 1);
    assert_eq!(store.blob_count(), 0);

    let live_hash = changes[0].new_hash.clone().unwrap();
    assert!(store.read_blob(&repo, &live_hash).await.unwrap().is_none());
}
