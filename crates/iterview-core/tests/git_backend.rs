//! Checkpoints against real git repositories
//!
//! Every test returns early when no `git` executable is available.

use iterview_core::{ChangeStatus, CheckpointManager, IterviewConfig, IterviewResult, git};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git_in(repo: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(repo)
        .status()
        .unwrap();
    assert!(status.success(), "git {:?} failed", args);
}

fn init_repo(repo: &Path) {
    fs::create_dir_all(repo).unwrap();
    git_in(repo, &["init", "-q"]);
}

#[tokio::test]
async fn test_git_checkpoint_round_trip() -> IterviewResult<()> {
    if !git::is_available() {
        return Ok(());
    }
    let temp = TempDir::new().unwrap();
    let root = temp.path().canonicalize().unwrap();
    let repo = root.join("app");
    init_repo(&repo);
    fs::write(repo.join("tracked.txt"), "one\n").unwrap();
    fs::write(repo.join(".gitignore"), "*.log\n").unwrap();
    fs::write(repo.join("debug.log"), "ignored\n").unwrap();
    git_in(&repo, &["add", "tracked.txt", ".gitignore"]);

    let manager = CheckpointManager::new(&root, IterviewConfig::default())?;
    let created = manager.create_checkpoint().await?;
    assert_eq!(created.repository_count, 1);
    // tracked.txt and .gitignore; the ignored log is not recorded
    assert_eq!(created.file_count, 2);

    fs::write(repo.join("tracked.txt"), "two\n").unwrap();
    fs::write(repo.join("untracked.txt"), "new\n").unwrap();

    let changes = manager.changes_since(created.id).await?.unwrap();
    let summary: Vec<(&str, ChangeStatus)> =
        changes.iter().map(|c| (c.path.as_str(), c.status)).collect();
    assert_eq!(
        summary,
        vec![
            ("tracked.txt", ChangeStatus::Modified),
            ("untracked.txt", ChangeStatus::Added),
        ]
    );

    // The checkpointed blob was written to the object database
    let before = manager.content_at(created.id, &repo, "tracked.txt").await?;
    assert_eq!(before, Some(b"one\n".to_vec()));

    let diff = manager.diff_change(&changes[0]).await?;
    assert_eq!(diff.stat.insertions, 1);
    assert_eq!(diff.stat.deletions, 1);
    Ok(())
}

#[tokio::test]
async fn test_git_deleted_tracked_file_not_recorded() -> IterviewResult<()> {
    if !git::is_available() {
        return Ok(());
    }
    let temp = TempDir::new().unwrap();
    let root = temp.path().canonicalize().unwrap();
    init_repo(&root);
    fs::write(root.join("keep.txt"), "k").unwrap();
    fs::write(root.join("gone.txt"), "g").unwrap();
    git_in(&root, &["add", "keep.txt", "gone.txt"]);
    fs::remove_file(root.join("gone.txt")).unwrap();

    let manager = CheckpointManager::new(&root, IterviewConfig::default())?;
    let created = manager.create_checkpoint().await?;
    let manifest = manager.get_checkpoint(created.id).await?.unwrap();
    let snapshot = manifest.repository(&root).unwrap();

    assert!(snapshot.hash_of("keep.txt").is_some());
    assert!(snapshot.hash_of("gone.txt").is_none());

    // The storage directory was added to the repository's ignore file
    let ignore = fs::read_to_string(root.join(".gitignore")).unwrap();
    assert!(ignore.contains("/.iterview/"));
    Ok(())
}

#[tokio::test]
async fn test_git_fresh_checkpoint_has_no_changes() -> IterviewResult<()> {
    if !git::is_available() {
        return Ok(());
    }
    let temp = TempDir::new().unwrap();
    let root = temp.path().canonicalize().unwrap();
    init_repo(&root);
    fs::write(root.join("a.txt"), "a\n").unwrap();

    let manager = CheckpointManager::new(&root, IterviewConfig::default())?;
    let created = manager.create_checkpoint().await?;
    assert_eq!(created.repository_count, 1);

    let changes = manager.changes_since(created.id).await?.unwrap();
    assert!(changes.is_empty(), "unexpected changes: {:?}", changes);

    let manifest = manager.get_checkpoint(created.id).await?.unwrap();
    assert!(manifest.repository(&root).unwrap().hash_of(".gitignore").is_some());
    Ok(())
}

#[tokio::test]
async fn test_git_newline_in_file_name_keeps_repository() -> IterviewResult<()> {
    if !git::is_available() {
        return Ok(());
    }
    let temp = TempDir::new().unwrap();
    let root = temp.path().canonicalize().unwrap();
    init_repo(&root);
    for name in ["a.txt", "b.txt", "c.txt", "d.txt", "e.txt", "odd\nname.txt"] {
        fs::write(root.join(name), name).unwrap();
    }

    let manager = CheckpointManager::new(&root, IterviewConfig::default().without_gitignore())?;
    let created = manager.create_checkpoint().await?;
    assert_eq!(created.file_count, 6);

    let before = manager.content_at(created.id, &root, "odd\nname.txt").await?;
    assert_eq!(before, Some(b"odd\nname.txt".to_vec()));

    fs::write(root.join("odd\nname.txt"), "changed").unwrap();
    let changes = manager.changes_since(created.id).await?.unwrap();
    let summary: Vec<(&str, ChangeStatus)> =
        changes.iter().map(|c| (c.path.as_str(), c.status)).collect();
    assert_eq!(summary, vec![("odd\nname.txt", ChangeStatus::Modified)]);
    Ok(())
}
