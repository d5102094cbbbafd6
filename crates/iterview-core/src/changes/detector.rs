//! Live change detection against a checkpoint

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use super::types::{Change, sort_changes};
use crate::error::IterviewResult;
use crate::manifest::{Manifest, RepoSnapshot};
use crate::repo::{FileLister, without_storage_files};
use crate::store::ContentStore;

/// Compares checkpoints with the working trees as they are now
///
/// Hashing goes through the blocking path of the content store without
/// writing blobs; each repository is hashed in a single batch.
#[derive(Clone)]
pub struct ChangeDetector {
    content_store: Arc<dyn ContentStore>,
    lister: Arc<dyn FileLister>,
}

impl ChangeDetector {
    pub fn new(content_store: Arc<dyn ContentStore>, lister: Arc<dyn FileLister>) -> Self {
        Self {
            content_store,
            lister,
        }
    }

    /// Changes from `manifest` to the live filesystem
    ///
    /// `current_repos` are the repositories discoverable now; any of them
    /// missing from the manifest has all of its files reported as added.
    /// Files under `storage_path` are never reported.
    pub fn changes_since(
        &self,
        manifest: &Manifest,
        current_repos: &[PathBuf],
        storage_path: &Path,
    ) -> Vec<Change> {
        let mut changes = Vec::new();

        for (repo, snapshot) in &manifest.repositories {
            match self.repository_changes(repo, snapshot, storage_path) {
                Ok(repo_changes) => changes.extend(repo_changes),
                Err(e) => warn!("Skipping change detection for {}: {}", repo.display(), e),
            }
        }

        let empty = RepoSnapshot::default();
        for repo in current_repos {
            if manifest.repositories.contains_key(repo) {
                continue;
            }
            debug!("Repository {} is new since checkpoint {}", repo.display(), manifest.id);
            match self.repository_changes(repo, &empty, storage_path) {
                Ok(repo_changes) => changes.extend(repo_changes),
                Err(e) => warn!("Skipping new repository {}: {}", repo.display(), e),
            }
        }

        sort_changes(&mut changes);
        changes
    }

    /// Changes within one repository relative to its recorded snapshot
    pub fn repository_changes(
        &self,
        repo: &Path,
        snapshot: &RepoSnapshot,
        storage_path: &Path,
    ) -> IterviewResult<Vec<Change>> {
        if !repo.is_dir() {
            debug!("Repository {} no longer exists", repo.display());
            return Ok(snapshot
                .files
                .iter()
                .map(|(path, record)| Change::deleted(repo, path.as_str(), &record.content_hash))
                .collect());
        }

        let current = self.lister.existing_files(repo)?;
        let current = without_storage_files(current, repo, storage_path);

        // Recorded paths still on disk, plus paths the snapshot never saw
        let mut to_hash: BTreeSet<String> = snapshot
            .files
            .keys()
            .filter(|path| repo.join(path).is_file())
            .cloned()
            .collect();
        to_hash.extend(
            current
                .into_iter()
                .filter(|path| !snapshot.files.contains_key(path)),
        );

        let paths: Vec<String> = to_hash.into_iter().collect();
        let hashes = self
            .content_store
            .hash_paths_blocking(repo, &paths, false)?;
        let live: BTreeMap<String, String> = paths.into_iter().zip(hashes).collect();
        debug!("Hashed {} live files in {}", live.len(), repo.display());

        let mut changes = Vec::new();
        for (path, record) in &snapshot.files {
            match live.get(path) {
                None => changes.push(Change::deleted(repo, path.as_str(), &record.content_hash)),
                Some(hash) if *hash != record.content_hash => changes.push(Change::modified(
                    repo,
                    path.as_str(),
                    &record.content_hash,
                    hash,
                )),
                Some(_) => {}
            }
        }
        for (path, hash) in live {
            if !snapshot.files.contains_key(&path) {
                changes.push(Change::added(repo, path, hash));
            }
        }

        Ok(changes)
    }
}
