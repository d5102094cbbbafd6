//! Checkpoint creation and change tracking operations

use std::path::PathBuf;
use tracing::{info, warn};

use crate::changes::{Change, changes_between};
use crate::diff::TextDiff;
use crate::error::{IterviewError, IterviewResult};
use crate::gitignore::ensure_storage_ignored;
use crate::manifest::{CheckpointId, Manifest};

use super::types::{CheckpointCreated, CheckpointManager};

impl CheckpointManager {
    /// Record the current state of every repository under the project root
    ///
    /// Fails with `NoRepositories` when nothing is discovered, in which case
    /// no manifest is written. A repository whose hashing fails is recorded
    /// with no files.
    pub async fn create_checkpoint(&self) -> IterviewResult<CheckpointCreated> {
        let _guard = self.create_lock.lock().await;

        let repos = self.discover().await?;
        if repos.is_empty() {
            return Err(IterviewError::no_repositories(&self.project_root));
        }

        // before the scan, so the checkpoint already holds the ignore entry
        if self.config.auto_gitignore {
            self.update_gitignores(&repos).await;
        }

        let id = self.manifests.next_id().await?;
        info!("Creating checkpoint {} across {} repositories", id, repos.len());

        let manifest = self
            .builder
            .build(id, &self.project_root, repos, &self.storage_path)
            .await?;
        self.manifests.save(&manifest).await?;
        self.manifests.prune(self.config.max_checkpoints).await;

        let created = CheckpointCreated {
            id,
            file_count: manifest.file_count(),
            repository_count: manifest.repository_count(),
        };
        info!(
            "Created checkpoint {} with {} files",
            created.id, created.file_count
        );
        Ok(created)
    }

    /// Changes from checkpoint `id` to the working trees as they are now
    ///
    /// `None` when the checkpoint does not exist; an empty list when nothing
    /// changed.
    pub async fn changes_since(&self, id: CheckpointId) -> IterviewResult<Option<Vec<Change>>> {
        let Some(manifest) = self.manifests.load(id).await? else {
            return Ok(None);
        };
        Ok(Some(self.detect(manifest).await?))
    }

    /// Changes since the latest checkpoint, with that checkpoint's id
    pub async fn changes_since_latest(
        &self,
    ) -> IterviewResult<Option<(CheckpointId, Vec<Change>)>> {
        let Some(manifest) = self.manifests.latest().await? else {
            return Ok(None);
        };
        let id = manifest.id;
        Ok(Some((id, self.detect(manifest).await?)))
    }

    /// Changes between two checkpoints; `None` if either does not exist
    pub async fn changes_between(
        &self,
        from: CheckpointId,
        to: CheckpointId,
    ) -> IterviewResult<Option<Vec<Change>>> {
        let Some(from) = self.manifests.load(from).await? else {
            return Ok(None);
        };
        let Some(to) = self.manifests.load(to).await? else {
            return Ok(None);
        };
        Ok(Some(changes_between(&from, &to)))
    }

    /// Unified diff for one change
    ///
    /// The old side comes from the blob store. The new side comes from the
    /// blob store, or from the working tree when the blob was never stored.
    /// A side that does not exist is diffed as empty.
    pub async fn diff_change(&self, change: &Change) -> IterviewResult<TextDiff> {
        let old = match &change.old_hash {
            Some(hash) => self
                .content_store
                .read_blob(&change.repository, hash)
                .await?
                .unwrap_or_default(),
            None => Vec::new(),
        };

        let new = match &change.new_hash {
            Some(hash) => match self.content_store.read_blob(&change.repository, hash).await? {
                Some(content) => content,
                None => read_live(change.absolute_path()).await,
            },
            None => Vec::new(),
        };

        Ok(TextDiff::compute_bytes(&old, &new, &change.path))
    }

    // Internal helper methods

    async fn detect(&self, manifest: Manifest) -> IterviewResult<Vec<Change>> {
        let repos = self.discover().await?;
        let detector = self.detector.clone();
        let storage = self.storage_path.clone();
        let changes = tokio::task::spawn_blocking(move || {
            detector.changes_since(&manifest, &repos, &storage)
        })
        .await?;
        Ok(changes)
    }

    async fn update_gitignores(&self, repos: &[PathBuf]) {
        for repo in repos {
            if let Err(e) = ensure_storage_ignored(repo, &self.storage_path).await {
                warn!("Failed to update .gitignore in {}: {}", repo.display(), e);
            }
        }
    }
}

async fn read_live(path: PathBuf) -> Vec<u8> {
    match tokio::fs::read(&path).await {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
