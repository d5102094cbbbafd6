//! File-based manifest storage

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use super::ManifestStore;
use super::types::{CheckpointId, Manifest};
use crate::error::{IterviewError, IterviewResult};

const MANIFESTS_DIR: &str = "manifests";
const FILE_PREFIX: &str = "checkpoint-";
const FILE_EXT: &str = "json";

/// File-based manifest storage
///
/// Stores manifests in a directory structure:
/// ```text
/// base_path/
///   manifests/
///     checkpoint-{id}.json
/// ```
/// Writes go to a `.tmp` sibling first and are renamed into place, so a
/// reader never observes a half-written manifest.
#[derive(Debug, Clone)]
pub struct FileManifestStore {
    base_path: PathBuf,
}

impl FileManifestStore {
    /// Create a store rooted at the storage directory
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Directory holding the manifest files
    pub fn manifests_dir(&self) -> PathBuf {
        self.base_path.join(MANIFESTS_DIR)
    }

    /// Path of the manifest file for `id`
    pub fn manifest_path(&self, id: CheckpointId) -> PathBuf {
        self.manifests_dir()
            .join(format!("{}{}.{}", FILE_PREFIX, id, FILE_EXT))
    }

    fn temp_path(&self, id: CheckpointId) -> PathBuf {
        self.manifests_dir()
            .join(format!("{}{}.{}.tmp", FILE_PREFIX, id, FILE_EXT))
    }

    /// Parse `checkpoint-<id>.json` into its id
    fn parse_id(file_name: &str) -> Option<CheckpointId> {
        let id = file_name
            .strip_prefix(FILE_PREFIX)?
            .strip_suffix(FILE_EXT)?
            .strip_suffix('.')?;
        match id.parse::<CheckpointId>() {
            Ok(id) if id > 0 => Some(id),
            _ => None,
        }
    }

    /// Ids of every manifest file present, ascending
    ///
    /// Based on file names only, so an unreadable manifest still holds its id.
    pub async fn ids(&self) -> IterviewResult<Vec<CheckpointId>> {
        let dir = self.manifests_dir();
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(IterviewError::storage(format!(
                    "Failed to read manifests directory {}: {}",
                    dir.display(),
                    e
                )));
            }
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| IterviewError::storage(format!("Failed to read directory entry: {}", e)))?
        {
            if let Some(id) = entry.file_name().to_str().and_then(Self::parse_id) {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    /// Remove `.tmp` files left behind by interrupted saves
    async fn remove_stale_temp_files(&self) {
        let Ok(mut entries) = fs::read_dir(self.manifests_dir()).await else {
            return;
        };
        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name();
            if name.to_str().is_some_and(|n| n.starts_with(FILE_PREFIX) && n.ends_with(".tmp")) {
                if let Err(e) = fs::remove_file(entry.path()).await {
                    warn!("Failed to remove {:?}: {}", entry.path(), e);
                }
            }
        }
    }

    async fn remove(&self, id: CheckpointId) -> std::io::Result<bool> {
        match fs::remove_file(self.manifest_path(id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl ManifestStore for FileManifestStore {
    async fn next_id(&self) -> IterviewResult<CheckpointId> {
        Ok(self.ids().await?.last().map_or(1, |max| max + 1))
    }

    async fn save(&self, manifest: &Manifest) -> IterviewResult<()> {
        manifest.validate()?;

        let dir = self.manifests_dir();
        fs::create_dir_all(&dir).await.map_err(|e| {
            IterviewError::storage(format!("Failed to create manifests directory: {}", e))
        })?;

        let path = self.manifest_path(manifest.id);
        if fs::try_exists(&path).await.unwrap_or(false) {
            return Err(IterviewError::storage_with_context(
                format!("Checkpoint {} already exists", manifest.id),
                path.display().to_string(),
            ));
        }

        let json = serde_json::to_string_pretty(manifest)
            .map_err(|e| IterviewError::storage(format!("Failed to serialize manifest: {}", e)))?;

        let tmp = self.temp_path(manifest.id);
        fs::write(&tmp, json.as_bytes())
            .await
            .map_err(|e| IterviewError::storage(format!("Failed to write manifest file: {}", e)))?;

        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(IterviewError::storage(format!(
                "Failed to move manifest into place: {}",
                e
            )));
        }

        debug!("Saved checkpoint {} to {:?}", manifest.id, path);
        Ok(())
    }

    async fn load(&self, id: CheckpointId) -> IterviewResult<Option<Manifest>> {
        let path = self.manifest_path(id);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!("Skipping unreadable manifest {:?}: {}", path, e);
                return Ok(None);
            }
            Err(e) => {
                return Err(IterviewError::storage(format!(
                    "Failed to read manifest file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let manifest: Manifest = match serde_json::from_str(&content) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!("Skipping malformed manifest {:?}: {}", path, e);
                return Ok(None);
            }
        };

        if manifest.id != id {
            warn!(
                "Skipping manifest {:?}: file is named for {} but contains {}",
                path, id, manifest.id
            );
            return Ok(None);
        }
        if let Err(e) = manifest.validate() {
            warn!("Skipping invalid manifest {:?}: {}", path, e);
            return Ok(None);
        }

        Ok(Some(manifest))
    }

    async fn list(&self) -> IterviewResult<Vec<Manifest>> {
        let mut manifests = Vec::new();
        for id in self.ids().await?.into_iter().rev() {
            if let Some(manifest) = self.load(id).await? {
                manifests.push(manifest);
            }
        }
        Ok(manifests)
    }

    async fn latest(&self) -> IterviewResult<Option<Manifest>> {
        for id in self.ids().await?.into_iter().rev() {
            if let Some(manifest) = self.load(id).await? {
                return Ok(Some(manifest));
            }
        }
        Ok(None)
    }

    async fn delete(&self, id: CheckpointId) -> IterviewResult<bool> {
        let removed = self.remove(id).await.map_err(|e| {
            IterviewError::storage(format!("Failed to delete checkpoint {}: {}", id, e))
        })?;
        if removed {
            debug!("Deleted checkpoint {}", id);
        }
        Ok(removed)
    }

    async fn prune(&self, max_count: usize) -> usize {
        let ids = match self.ids().await {
            Ok(ids) => ids,
            Err(e) => {
                warn!("Skipping prune: {}", e);
                return 0;
            }
        };

        if ids.len() <= max_count {
            return 0;
        }

        let to_remove = ids.len() - max_count;
        debug!("Pruning {} old checkpoints", to_remove);

        let mut removed = 0;
        for id in ids.into_iter().take(to_remove) {
            match self.remove(id).await {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => warn!("Failed to prune checkpoint {}: {}", id, e),
            }
        }

        if removed > 0 {
            info!("Pruned {} checkpoints (keeping {})", removed, max_count);
        }
        removed
    }

    async fn clear_all(&self) -> IterviewResult<usize> {
        let ids = self.ids().await?;
        let mut removed = 0;

        for id in ids {
            match self.remove(id).await {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => warn!("Failed to delete checkpoint {}: {}", id, e),
            }
        }

        self.remove_stale_temp_files().await;

        info!("Cleared {} checkpoints", removed);
        Ok(removed)
    }
}
