//! CLI commands

pub mod changes;
pub mod checkpoint;
pub mod content;

use iterview_core::{Change, CheckpointId, IterviewError};
use std::path::Path;

/// Where a change lives, relative to the project root when possible
pub fn change_location(root: &Path, change: &Change) -> String {
    match change.repository.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => change.path.clone(),
        Ok(relative) => format!("{}/{}", relative.display(), change.path),
        Err(_) => change.absolute_path().display().to_string(),
    }
}

pub fn checkpoint_not_found(id: CheckpointId) -> IterviewError {
    IterviewError::not_found_resource(format!("Checkpoint {} not found", id), "checkpoint")
}
