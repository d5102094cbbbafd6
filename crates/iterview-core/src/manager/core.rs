//! Checkpoint queries and housekeeping

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::IterviewResult;
use crate::manifest::{CheckpointId, CheckpointSummary, Manifest};

use super::types::CheckpointManager;

impl CheckpointManager {
    /// List all readable checkpoints, newest first
    pub async fn list_checkpoints(&self) -> IterviewResult<Vec<CheckpointSummary>> {
        let manifests = self.manifests.list().await?;
        Ok(manifests.iter().map(CheckpointSummary::from).collect())
    }

    /// Get a specific checkpoint
    pub async fn get_checkpoint(&self, id: CheckpointId) -> IterviewResult<Option<Manifest>> {
        self.manifests.load(id).await
    }

    /// Get the latest checkpoint
    pub async fn latest_checkpoint(&self) -> IterviewResult<Option<Manifest>> {
        self.manifests.latest().await
    }

    /// Id the next checkpoint will receive
    pub async fn next_id(&self) -> IterviewResult<CheckpointId> {
        self.manifests.next_id().await
    }

    /// Delete a checkpoint, returning whether it existed
    pub async fn delete_checkpoint(&self, id: CheckpointId) -> IterviewResult<bool> {
        self.manifests.delete(id).await
    }

    /// Delete all checkpoints and forget discovered repositories
    pub async fn clear_all(&self) -> IterviewResult<usize> {
        let _guard = self.create_lock.lock().await;
        let count = self.manifests.clear_all().await?;
        self.discovery.invalidate();
        info!("Cleared {} checkpoints", count);
        Ok(count)
    }

    /// Forget discovered repositories so the next operation searches again
    pub fn invalidate_repo_cache(&self) {
        self.discovery.invalidate();
    }

    /// Repositories under the project root
    pub async fn repositories(&self) -> IterviewResult<Vec<PathBuf>> {
        self.discover().await
    }

    /// Content of `path` in `repository` as recorded by checkpoint `id`
    ///
    /// `repository` may be absolute or relative to the checkpoint root.
    /// `None` when the checkpoint, repository, or path is not recorded, or
    /// the blob is no longer in the store.
    pub async fn content_at(
        &self,
        id: CheckpointId,
        repository: &Path,
        path: &str,
    ) -> IterviewResult<Option<Vec<u8>>> {
        let Some(manifest) = self.manifests.load(id).await? else {
            return Ok(None);
        };
        let Some((repo, snapshot)) = manifest.resolve_repository(repository) else {
            debug!("Checkpoint {} has no repository {}", id, repository.display());
            return Ok(None);
        };
        let Some(hash) = snapshot.hash_of(&normalize_path(path)) else {
            return Ok(None);
        };

        self.content_store.read_blob(repo, hash).await
    }
}

/// Repo-relative path in the form stored in snapshots
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}
