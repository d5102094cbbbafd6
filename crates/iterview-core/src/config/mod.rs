//! Configuration for the checkpoint engine
//!
//! Values only: the engine never reads files or the environment on its own.
//! Front ends build an [`IterviewConfig`] with [`load_from_file`] and
//! [`apply_env_overrides`] and hand it to [`crate::CheckpointManager`].

mod env_loader;
mod file_loader;
mod logging_config;
mod model;

pub use env_loader::{apply_env_overrides, apply_overrides_from};
pub use file_loader::load_from_file;
pub use logging_config::LoggingConfig;
pub use model::{DiscoveryConfig, IterviewConfig};

/// Default name of the storage directory, relative to the project root
pub const DEFAULT_STORAGE_DIR: &str = ".iterview";

/// Default number of retained checkpoints
pub const DEFAULT_MAX_CHECKPOINTS: usize = 20;

/// Default discovery depth
pub const DEFAULT_MAX_DEPTH: usize = 3;
