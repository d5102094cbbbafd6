//! Checkpoint manifests and their persistence
//!
//! Manifests are stored one file per checkpoint:
//! ```text
//! <storage_dir>/
//!   manifests/
//!     checkpoint-{id}.json
//! ```

mod file_store;
mod types;


use async_trait::async_trait;

use crate::error::IterviewResult;

pub use file_store::FileManifestStore;
pub use types::{CheckpointId, CheckpointSummary, FileRecord, Manifest, RepoSnapshot};

/// Trait for manifest storage backends
#[async_trait]
pub trait ManifestStore: Send + Sync {
    /// `max(existing ids) + 1`, or `1` when nothing is stored
    async fn next_id(&self) -> IterviewResult<CheckpointId>;

    /// Persist a manifest under its id; never overwrites an existing one
    async fn save(&self, manifest: &Manifest) -> IterviewResult<()>;

    /// Load a manifest; missing or malformed manifests are `None`
    async fn load(&self, id: CheckpointId) -> IterviewResult<Option<Manifest>>;

    /// All readable manifests, newest id first
    async fn list(&self) -> IterviewResult<Vec<Manifest>>;

    /// The readable manifest with the highest id
    async fn latest(&self) -> IterviewResult<Option<Manifest>>;

    /// Delete one manifest, returning whether it existed
    async fn delete(&self, id: CheckpointId) -> IterviewResult<bool>;

    /// Delete the oldest manifests until at most `max_count` remain
    ///
    /// Individual delete failures are logged, never returned. Returns the
    /// number of manifests deleted.
    async fn prune(&self, max_count: usize) -> usize;

    /// Delete every manifest, returning how many were deleted
    async fn clear_all(&self) -> IterviewResult<usize>;
}
