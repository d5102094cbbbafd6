//! Keeping the storage directory out of version control

use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::error::{IterviewError, IterviewResult};
use crate::repo::relative_to_repo;

const GITIGNORE: &str = ".gitignore";

/// Make sure `repo/.gitignore` ignores `storage_path`
///
/// Does nothing when the storage path lies outside the repository. Returns
/// whether the file was changed.
pub async fn ensure_storage_ignored(repo: &Path, storage_path: &Path) -> IterviewResult<bool> {
    let Some(relative) = relative_to_repo(repo, storage_path) else {
        return Ok(false);
    };

    let path = repo.join(GITIGNORE);
    let existing = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(IterviewError::io_with_path(e.to_string(), path)),
    };

    if existing.lines().any(|line| ignores(line, &relative)) {
        return Ok(false);
    }

    let mut updated = existing;
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(&format!("/{}/\n", relative));

    fs::write(&path, updated)
        .await
        .map_err(|e| IterviewError::io_with_path(e.to_string(), path.clone()))?;
    debug!("Added /{}/ to {}", relative, path.display());
    Ok(true)
}

/// Whether a `.gitignore` line already covers `relative`
fn ignores(line: &str, relative: &str) -> bool {
    let pattern = line.trim();
    let pattern = pattern.strip_prefix('/').unwrap_or(pattern);
    let pattern = pattern.strip_suffix('/').unwrap_or(pattern);
    pattern == relative
}
