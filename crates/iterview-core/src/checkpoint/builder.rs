//! Checkpoint builder

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::IterviewResult;
use crate::manifest::{CheckpointId, Manifest, RepoSnapshot};
use crate::repo::{FileLister, without_storage_files};
use crate::store::ContentStore;

/// Files of one repository selected for hashing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoScan {
    pub repository: PathBuf,
    /// Repo-relative paths that exist on disk, sorted
    pub files: Vec<String>,
}

impl RepoScan {
    pub fn new(repository: impl Into<PathBuf>, files: Vec<String>) -> Self {
        Self {
            repository: repository.into(),
            files,
        }
    }

    /// A repository that contributes nothing
    pub fn empty(repository: impl Into<PathBuf>) -> Self {
        Self::new(repository, Vec::new())
    }
}

/// Builds manifests from the live state of a set of repositories
#[derive(Clone)]
pub struct CheckpointBuilder {
    content_store: Arc<dyn ContentStore>,
    lister: Arc<dyn FileLister>,
}

impl CheckpointBuilder {
    pub fn new(content_store: Arc<dyn ContentStore>, lister: Arc<dyn FileLister>) -> Self {
        Self {
            content_store,
            lister,
        }
    }

    /// List the files of `repo` that exist on disk, outside `storage_path`
    pub fn scan_repository(&self, repo: &Path, storage_path: &Path) -> IterviewResult<RepoScan> {
        let files = self.lister.existing_files(repo)?;
        let files = without_storage_files(files, repo, storage_path);
        debug!("Scanned {} files in {}", files.len(), repo.display());
        Ok(RepoScan::new(repo, files))
    }

    /// Scan every repository; a failed listing contributes no files
    pub fn scan_all(&self, repos: &[PathBuf], storage_path: &Path) -> Vec<RepoScan> {
        repos
            .iter()
            .map(|repo| {
                self.scan_repository(repo, storage_path)
                    .unwrap_or_else(|e| {
                        warn!("Failed to list files in {}: {}", repo.display(), e);
                        RepoScan::empty(repo)
                    })
            })
            .collect()
    }

    /// Hash and store every scanned repository concurrently
    ///
    /// Every repository gets an entry in the result. One whose batch fails,
    /// or whose task panics, keeps an empty snapshot and never affects the
    /// others.
    pub async fn hash_repositories(
        &self,
        scans: Vec<RepoScan>,
    ) -> BTreeMap<PathBuf, RepoSnapshot> {
        let mut results: BTreeMap<PathBuf, RepoSnapshot> = scans
            .iter()
            .map(|scan| (scan.repository.clone(), RepoSnapshot::default()))
            .collect();

        let mut tasks = JoinSet::new();
        for scan in scans {
            let store = Arc::clone(&self.content_store);
            tasks.spawn(async move {
                let hashed = store.hash_paths(&scan.repository, &scan.files, true).await;
                let snapshot = hashed.map(|hashes| {
                    RepoSnapshot::from_pairs(scan.files.into_iter().zip(hashes))
                });
                (scan.repository, snapshot)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((repo, Ok(snapshot))) => {
                    debug!("Hashed {} files in {}", snapshot.file_count(), repo.display());
                    results.insert(repo, snapshot);
                }
                Ok((repo, Err(e))) => {
                    warn!("Recording no files for {}: {}", repo.display(), e);
                }
                Err(e) => {
                    warn!("Hashing task did not complete: {}", e);
                }
            }
        }

        results
    }

    /// Build the manifest for `repos` as they are on disk now
    pub async fn build(
        &self,
        id: CheckpointId,
        root: &Path,
        repos: Vec<PathBuf>,
        storage_path: &Path,
    ) -> IterviewResult<Manifest> {
        let builder = self.clone();
        let storage = storage_path.to_path_buf();
        let scans =
            tokio::task::spawn_blocking(move || builder.scan_all(&repos, &storage)).await?;

        let mut manifest = Manifest::new(id, root);
        manifest.repositories = self.hash_repositories(scans).await;
        Ok(manifest)
    }
}
