//! Manifest type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::error::{IterviewError, IterviewResult};

/// Checkpoint identifier, assigned monotonically from 1
pub type CheckpointId = u64;

/// Record of one file's content at checkpoint time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Content-addressed identifier of the file's bytes
    pub content_hash: String,
}

impl FileRecord {
    pub fn new(content_hash: impl Into<String>) -> Self {
        Self {
            content_hash: content_hash.into(),
        }
    }
}

/// Files of one repository at checkpoint time
///
/// A path absent from `files` did not exist when the checkpoint was taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSnapshot {
    /// Repo-relative path (with `/` separators) to record
    pub files: BTreeMap<String, FileRecord>,
}

impl RepoSnapshot {
    /// Build a snapshot from `(path, hash)` pairs
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            files: pairs
                .into_iter()
                .map(|(path, hash)| (path, FileRecord::new(hash)))
                .collect(),
        }
    }

    /// Stored hash for `path`
    pub fn hash_of(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(|r| r.content_hash.as_str())
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A checkpoint: the state of every discovered repository at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Unique, monotonically assigned identifier
    pub id: CheckpointId,

    /// When the checkpoint was created
    pub created_at: DateTime<Utc>,

    /// Directory the checkpoint was taken from
    pub root: PathBuf,

    /// Repository root to its snapshot
    pub repositories: BTreeMap<PathBuf, RepoSnapshot>,
}

impl Manifest {
    /// Create an empty manifest stamped with the current time
    pub fn new(id: CheckpointId, root: impl Into<PathBuf>) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            root: root.into(),
            repositories: BTreeMap::new(),
        }
    }

    /// Add a repository snapshot
    pub fn with_repository(mut self, repo: impl Into<PathBuf>, snapshot: RepoSnapshot) -> Self {
        self.repositories.insert(repo.into(), snapshot);
        self
    }

    /// Total number of files across repositories
    pub fn file_count(&self) -> usize {
        self.repositories.values().map(RepoSnapshot::file_count).sum()
    }

    pub fn repository_count(&self) -> usize {
        self.repositories.len()
    }

    /// Snapshot of exactly `repo`
    pub fn repository(&self, repo: &Path) -> Option<&RepoSnapshot> {
        self.repositories.get(repo)
    }

    /// Resolve a repository given as an exact path or relative to `root`
    pub fn resolve_repository(&self, query: &Path) -> Option<(&Path, &RepoSnapshot)> {
        if let Some((path, snapshot)) = self.repositories.get_key_value(query) {
            return Some((path.as_path(), snapshot));
        }
        if query.is_absolute() {
            return None;
        }
        let candidate: PathBuf = self
            .root
            .join(query)
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        self.repositories
            .get_key_value(&candidate)
            .map(|(path, snapshot)| (path.as_path(), snapshot))
    }

    /// Check structural invariants of a decoded manifest
    pub fn validate(&self) -> IterviewResult<()> {
        if self.id == 0 {
            return Err(IterviewError::invalid_input_field(
                "checkpoint id must be positive",
                "id",
            ));
        }
        for (repo, snapshot) in &self.repositories {
            if repo.as_os_str().is_empty() {
                return Err(IterviewError::invalid_input_field(
                    "empty repository path",
                    "repositories",
                ));
            }
            for (path, record) in &snapshot.files {
                if path.is_empty() || path.starts_with('/') {
                    return Err(IterviewError::invalid_input_field(
                        format!("invalid file path '{}' in {}", path, repo.display()),
                        "files",
                    ));
                }
                if record.content_hash.is_empty()
                    || !record.content_hash.chars().all(|c| c.is_ascii_hexdigit())
                {
                    return Err(IterviewError::invalid_input_field(
                        format!("invalid content hash for '{}'", path),
                        "content_hash",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Summary of a checkpoint for listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointSummary {
    pub id: CheckpointId,
    pub created_at: DateTime<Utc>,
    pub root: PathBuf,
    pub repository_count: usize,
    pub file_count: usize,
}

impl From<&Manifest> for CheckpointSummary {
    fn from(manifest: &Manifest) -> Self {
        Self {
            id: manifest.id,
            created_at: manifest.created_at,
            root: manifest.root.clone(),
            repository_count: manifest.repository_count(),
            file_count: manifest.file_count(),
        }
    }
}
