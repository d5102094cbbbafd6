//! Manifest comparison logic

use std::collections::BTreeSet;
use std::path::Path;

use super::types::{Change, sort_changes};
use crate::manifest::{Manifest, RepoSnapshot};

/// Compare two snapshots of the same repository
///
/// A missing snapshot is treated as a repository with no files.
pub fn compare_snapshots(
    repository: &Path,
    before: Option<&RepoSnapshot>,
    after: Option<&RepoSnapshot>,
) -> Vec<Change> {
    let empty = RepoSnapshot::default();
    let before = before.unwrap_or(&empty);
    let after = after.unwrap_or(&empty);

    let all_paths: BTreeSet<&String> = before.files.keys().chain(after.files.keys()).collect();
    let mut changes = Vec::new();

    for path in all_paths {
        match (before.hash_of(path), after.hash_of(path)) {
            (Some(old), Some(new)) => {
                if old != new {
                    changes.push(Change::modified(repository, path.as_str(), old, new));
                }
            }
            (Some(old), None) => changes.push(Change::deleted(repository, path.as_str(), old)),
            (None, Some(new)) => changes.push(Change::added(repository, path.as_str(), new)),
            (None, None) => {}
        }
    }

    changes
}

/// Compare two manifests without touching the filesystem
///
/// Covers the union of both manifests' repositories.
pub fn changes_between(from: &Manifest, to: &Manifest) -> Vec<Change> {
    let repositories: BTreeSet<&Path> = from
        .repositories
        .keys()
        .chain(to.repositories.keys())
        .map(|p| p.as_path())
        .collect();

    let mut changes: Vec<Change> = repositories
        .into_iter()
        .flat_map(|repo| compare_snapshots(repo, from.repository(repo), to.repository(repo)))
        .collect();

    sort_changes(&mut changes);
    changes
}
