//! Configuration model

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::logging_config::LoggingConfig;
use super::{DEFAULT_MAX_CHECKPOINTS, DEFAULT_MAX_DEPTH, DEFAULT_STORAGE_DIR};
use crate::error::{IterviewError, IterviewResult};

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IterviewConfig {
    /// Maximum number of checkpoints kept on disk
    pub max_checkpoints: usize,
    /// Storage directory (relative to the project root unless absolute)
    pub storage_dir: PathBuf,
    /// Add the storage directory to `.gitignore` of repositories containing it
    pub auto_gitignore: bool,
    /// Repository discovery settings
    pub discovery: DiscoveryConfig,
    /// Logging settings (consumed by front ends)
    pub logging: LoggingConfig,
}

impl Default for IterviewConfig {
    fn default() -> Self {
        Self {
            max_checkpoints: DEFAULT_MAX_CHECKPOINTS,
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            auto_gitignore: true,
            discovery: DiscoveryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl IterviewConfig {
    /// Set max checkpoints
    pub fn with_max_checkpoints(mut self, max: usize) -> Self {
        self.max_checkpoints = max;
        self
    }

    /// Set storage directory
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Disable `.gitignore` maintenance
    pub fn without_gitignore(mut self) -> Self {
        self.auto_gitignore = false;
        self
    }

    /// Set discovery depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.discovery.max_depth = depth;
        self
    }

    /// Add a directory name skipped during discovery
    pub fn exclude_dir(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.discovery.exclude_dirs.contains(&name) {
            self.discovery.exclude_dirs.push(name);
        }
        self
    }

    /// Check the configuration for values the engine cannot work with
    pub fn validate(&self) -> IterviewResult<()> {
        if self.max_checkpoints == 0 {
            return Err(IterviewError::invalid_input_field(
                "max_checkpoints must be at least 1",
                "max_checkpoints",
            ));
        }
        if self.storage_dir.as_os_str().is_empty() {
            return Err(IterviewError::invalid_input_field(
                "storage_dir must not be empty",
                "storage_dir",
            ));
        }
        Ok(())
    }
}

/// Repository discovery settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// How many directories deep to look for repository markers
    pub max_depth: usize,
    /// Directory names never descended into
    pub exclude_dirs: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            exclude_dirs: [
                "node_modules",
                "target",
                ".venv",
                "venv",
                "dist",
                "build",
                "__pycache__",
                DEFAULT_STORAGE_DIR,
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}
