//! Repository discovery with a session-scoped cache

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::REPO_MARKER;
use crate::config::DiscoveryConfig;
use crate::error::{IterviewError, IterviewResult};
use crate::git;

/// Discovery session owning the repository cache
///
/// Results are cached per root until [`RepoDiscovery::invalidate`] is called.
/// Empty results are not cached, so a repository created later is picked up
/// on the next call.
#[derive(Debug, Default)]
pub struct RepoDiscovery {
    cache: Mutex<HashMap<PathBuf, Vec<PathBuf>>>,
}

impl RepoDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover repositories under `root`, serving repeat calls from the cache
    ///
    /// Never fails: problems are logged and yield an empty list.
    pub fn discover(&self, root: &Path, config: &DiscoveryConfig) -> Vec<PathBuf> {
        let key = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());

        if let Some(cached) = self.cache.lock().get(&key) {
            return cached.clone();
        }

        let found = match discover_repositories(&key, config.max_depth, &config.exclude_dirs) {
            Ok(repos) if !repos.is_empty() => repos,
            Ok(_) => fallback_toplevel(&key),
            Err(e) => {
                warn!("Repository search failed under {}: {}", key.display(), e);
                fallback_toplevel(&key)
            }
        };

        if found.is_empty() {
            warn!("No repositories found under {}", key.display());
        } else {
            debug!("Discovered {} repositories under {}", found.len(), key.display());
            self.cache.lock().insert(key, found.clone());
        }
        found
    }

    /// Drop every cached result
    pub fn invalidate(&self) {
        let mut cache = self.cache.lock();
        if !cache.is_empty() {
            debug!("Invalidated repository cache ({} roots)", cache.len());
        }
        cache.clear();
    }

    /// Whether a result for `root` is cached
    pub fn is_cached(&self, root: &Path) -> bool {
        let key = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        self.cache.lock().contains_key(&key)
    }
}

/// Search `root` for working-tree markers up to `max_depth` directories deep
///
/// A repository at depth `d` (the root itself is depth 0) is found when
/// `d <= max_depth`. Directories named in `exclude_dirs` are not descended
/// into; the marker itself is always recognised. Results are sorted.
pub fn discover_repositories(
    root: &Path,
    max_depth: usize,
    exclude_dirs: &[String],
) -> IterviewResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(IterviewError::discovery(
            "root is not a directory",
            root.to_path_buf(),
        ));
    }

    let mut repos = Vec::new();
    let mut walker = WalkDir::new(root)
        .max_depth(max_depth + 1)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            if name == REPO_MARKER {
                return true;
            }
            !(entry.file_type().is_dir() && exclude_dirs.iter().any(|d| *d == name))
        });

    while let Some(next) = walker.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(IterviewError::discovery(e.to_string(), root.to_path_buf()));
            }
            Err(e) => {
                debug!("Skipping unreadable entry during discovery: {}", e);
                continue;
            }
        };

        if entry.depth() > 0 && entry.file_name() == REPO_MARKER {
            if let Some(parent) = entry.path().parent() {
                repos.push(parent.to_path_buf());
            }
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
        }
    }

    repos.sort();
    repos.dedup();
    Ok(repos)
}

/// Single-repository fallback: the working tree `root` itself lives in
fn fallback_toplevel(root: &Path) -> Vec<PathBuf> {
    match git::show_toplevel(root) {
        Ok(Some(top)) => {
            debug!("Falling back to enclosing repository {}", top.display());
            vec![top.canonicalize().unwrap_or(top)]
        }
        Ok(None) => Vec::new(),
        Err(e) => {
            debug!("Fallback repository lookup failed: {}", e);
            Vec::new()
        }
    }
}
