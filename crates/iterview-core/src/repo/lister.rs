//! Repository file enumeration

use std::collections::BTreeSet;
use std::path::{Component, Path};
use tracing::warn;
use walkdir::WalkDir;

use super::REPO_MARKER;
use crate::error::{IterviewError, IterviewResult};
use crate::git;

/// Lists the files of a working tree, repo-relative with `/` separators
pub trait FileLister: Send + Sync {
    /// Files known to the tracking system
    fn tracked_files(&self, repo: &Path) -> IterviewResult<Vec<String>>;

    /// Files not tracked and not ignored
    fn untracked_files(&self, repo: &Path) -> IterviewResult<Vec<String>>;

    /// Sorted union of tracked and untracked files that exist on disk
    ///
    /// A file can still be listed as tracked after it was deleted; such
    /// entries are dropped here.
    fn existing_files(&self, repo: &Path) -> IterviewResult<Vec<String>> {
        let mut files: BTreeSet<String> = self.tracked_files(repo)?.into_iter().collect();
        files.extend(self.untracked_files(repo)?);
        Ok(files
            .into_iter()
            .filter(|path| repo.join(path).is_file())
            .collect())
    }
}

/// Enumerates files with `git ls-files`
#[derive(Debug, Clone, Copy, Default)]
pub struct GitFileLister;

impl GitFileLister {
    pub fn new() -> Self {
        Self
    }
}

impl FileLister for GitFileLister {
    fn tracked_files(&self, repo: &Path) -> IterviewResult<Vec<String>> {
        let output = git::run_blocking(repo, &["ls-files", "-z"], None)?;
        Ok(git::split_nul(&output))
    }

    fn untracked_files(&self, repo: &Path) -> IterviewResult<Vec<String>> {
        let output = git::run_blocking(
            repo,
            &["ls-files", "-z", "--others", "--exclude-standard"],
            None,
        )?;
        Ok(git::split_nul(&output))
    }
}

/// Enumerates files by walking the working tree
///
/// Nothing counts as tracked; every file outside the marker, excluded
/// directories, and nested repositories is reported as untracked.
#[derive(Debug, Clone, Default)]
pub struct WalkFileLister {
    exclude_dirs: Vec<String>,
}

impl WalkFileLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip directories with these names
    pub fn with_excluded_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }
}

impl FileLister for WalkFileLister {
    fn tracked_files(&self, _repo: &Path) -> IterviewResult<Vec<String>> {
        Ok(Vec::new())
    }

    fn untracked_files(&self, repo: &Path) -> IterviewResult<Vec<String>> {
        if !repo.is_dir() {
            return Err(IterviewError::io_with_path(
                "repository directory does not exist",
                repo.to_path_buf(),
            ));
        }

        let walker = WalkDir::new(repo).into_iter().filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            if name == REPO_MARKER {
                return false;
            }
            if entry.file_type().is_dir() {
                if self.exclude_dirs.iter().any(|d| *d == name) {
                    return false;
                }
                // nested working trees belong to their own repository
                return !entry.path().join(REPO_MARKER).exists();
            }
            true
        });

        let mut files = Vec::new();
        for entry in walker.filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(repo) {
                if relative.to_str().is_none() {
                    warn!("Skipping non-UTF-8 path {}", relative.display());
                    continue;
                }
                files.push(to_slash_path(relative));
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Render a relative path with `/` separators
pub(crate) fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Repo-relative form of `path` when it lies strictly inside `repo`
pub(crate) fn relative_to_repo(repo: &Path, path: &Path) -> Option<String> {
    let relative = to_slash_path(path.strip_prefix(repo).ok()?);
    (!relative.is_empty()).then_some(relative)
}

/// Drop listed files that live under `storage_path`
pub(crate) fn without_storage_files(
    files: Vec<String>,
    repo: &Path,
    storage_path: &Path,
) -> Vec<String> {
    let Some(prefix) = relative_to_repo(repo, storage_path) else {
        return files;
    };
    files
        .into_iter()
        .filter(|file| {
            file != &prefix
                && !(file.starts_with(&prefix) && file[prefix.len()..].starts_with('/'))
        })
        .collect()
}
