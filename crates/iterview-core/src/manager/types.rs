//! Checkpoint manager types and construction

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::changes::ChangeDetector;
use crate::checkpoint::CheckpointBuilder;
use crate::config::IterviewConfig;
use crate::error::IterviewResult;
use crate::manifest::{CheckpointId, FileManifestStore, ManifestStore};
use crate::repo::{FileLister, GitFileLister, RepoDiscovery};
use crate::store::{ContentStore, GitContentStore};

/// Outcome of a successful checkpoint creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointCreated {
    pub id: CheckpointId,
    pub file_count: usize,
    pub repository_count: usize,
}

/// Checkpoint manager for creating and comparing checkpoints
pub struct CheckpointManager {
    pub(super) config: IterviewConfig,
    pub(super) project_root: PathBuf,
    pub(super) storage_path: PathBuf,
    pub(super) manifests: Arc<dyn ManifestStore>,
    pub(super) discovery: Arc<RepoDiscovery>,
    pub(super) content_store: Arc<dyn ContentStore>,
    pub(super) builder: CheckpointBuilder,
    pub(super) detector: ChangeDetector,
    /// Held from id reservation until the manifest is written
    pub(super) create_lock: tokio::sync::Mutex<()>,
}

impl CheckpointManager {
    /// Create a manager backed by git
    pub fn new(project_root: impl AsRef<Path>, config: IterviewConfig) -> IterviewResult<Self> {
        Self::with_backends(
            project_root,
            config,
            Arc::new(GitContentStore::new()),
            Arc::new(GitFileLister::new()),
        )
    }

    /// Create with custom content store and file lister
    pub fn with_backends(
        project_root: impl AsRef<Path>,
        config: IterviewConfig,
        content_store: Arc<dyn ContentStore>,
        lister: Arc<dyn FileLister>,
    ) -> IterviewResult<Self> {
        config.validate()?;

        let project_root = project_root.as_ref();
        let project_root = project_root
            .canonicalize()
            .unwrap_or_else(|_| project_root.to_path_buf());
        let storage_path = if config.storage_dir.is_absolute() {
            config.storage_dir.clone()
        } else {
            project_root.join(&config.storage_dir)
        };

        Ok(Self {
            manifests: Arc::new(FileManifestStore::new(&storage_path)),
            discovery: Arc::new(RepoDiscovery::new()),
            builder: CheckpointBuilder::new(Arc::clone(&content_store), Arc::clone(&lister)),
            detector: ChangeDetector::new(Arc::clone(&content_store), lister),
            content_store,
            config,
            project_root,
            storage_path,
            create_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// Use a custom manifest store
    pub fn with_manifest_store(mut self, manifests: Arc<dyn ManifestStore>) -> Self {
        self.manifests = manifests;
        self
    }

    /// Share a discovery session with other managers
    pub fn with_discovery(mut self, discovery: Arc<RepoDiscovery>) -> Self {
        self.discovery = discovery;
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &IterviewConfig {
        &self.config
    }

    /// Directory checkpoints are taken from
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Directory manifests are stored under
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    // Internal helper methods

    /// Repositories under the project root, served from the discovery cache
    pub(super) async fn discover(&self) -> IterviewResult<Vec<PathBuf>> {
        let discovery = Arc::clone(&self.discovery);
        let root = self.project_root.clone();
        let config = self.config.discovery.clone();
        Ok(tokio::task::spawn_blocking(move || discovery.discover(&root, &config)).await?)
    }
}
