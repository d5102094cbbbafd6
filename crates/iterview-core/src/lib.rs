//! Iterview core
//!
//! Checkpoints record the content of every file in every repository under
//! a project root. They can later be compared with the live working trees
//! or with each other, and any recorded file can be read back.
//!
//! ```no_run
//! use iterview_core::{CheckpointManager, IterviewConfig};
//!
//! # async fn run() -> iterview_core::IterviewResult<()> {
//! let manager = CheckpointManager::new(".", IterviewConfig::default())?;
//! let created = manager.create_checkpoint().await?;
//! if let Some(changes) = manager.changes_since(created.id).await? {
//!     for change in changes {
//!         println!("{:#} {}", change.status, change.path);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod changes;
pub mod checkpoint;
pub mod config;
pub mod diff;
pub mod error;
pub mod git;
pub mod gitignore;
pub mod manager;
pub mod manifest;
pub mod repo;
pub mod store;

pub use changes::{Change, ChangeDetector, ChangeStatus};
pub use checkpoint::CheckpointBuilder;
pub use config::{DiscoveryConfig, IterviewConfig, LoggingConfig};
pub use diff::{DiffStat, TextDiff};
pub use error::{IterviewError, IterviewResult, ResultExt, UnifiedError};
pub use manager::{CheckpointCreated, CheckpointManager};
pub use manifest::{
    CheckpointId, CheckpointSummary, FileManifestStore, FileRecord, Manifest, ManifestStore,
    RepoSnapshot,
};
pub use repo::{FileLister, GitFileLister, RepoDiscovery, WalkFileLister};
pub use store::{ContentStore, GitContentStore, MemoryContentStore};
