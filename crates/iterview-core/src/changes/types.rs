//! Change type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of a path-level change
///
/// The declaration order is the presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Modified,
    Added,
    Deleted,
}

impl ChangeStatus {
    /// One-letter code, as shown by `git status --short`
    pub fn short_code(&self) -> char {
        match self {
            Self::Modified => 'M',
            Self::Added => 'A',
            Self::Deleted => 'D',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modified => "modified",
            Self::Added => "added",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}", self.short_code())
        } else {
            write!(f, "{}", self.as_str())
        }
    }
}

/// A single path-level difference
///
/// `old_hash` is set for modified and deleted files, `new_hash` for
/// modified and added files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub repository: PathBuf,
    /// Repo-relative path with `/` separators
    pub path: String,
    pub status: ChangeStatus,
    pub old_hash: Option<String>,
    pub new_hash: Option<String>,
}

impl Change {
    pub fn modified(
        repository: impl Into<PathBuf>,
        path: impl Into<String>,
        old_hash: impl Into<String>,
        new_hash: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            path: path.into(),
            status: ChangeStatus::Modified,
            old_hash: Some(old_hash.into()),
            new_hash: Some(new_hash.into()),
        }
    }

    pub fn added(
        repository: impl Into<PathBuf>,
        path: impl Into<String>,
        new_hash: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            path: path.into(),
            status: ChangeStatus::Added,
            old_hash: None,
            new_hash: Some(new_hash.into()),
        }
    }

    pub fn deleted(
        repository: impl Into<PathBuf>,
        path: impl Into<String>,
        old_hash: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            path: path.into(),
            status: ChangeStatus::Deleted,
            old_hash: Some(old_hash.into()),
            new_hash: None,
        }
    }

    pub fn is_modified(&self) -> bool {
        self.status == ChangeStatus::Modified
    }

    pub fn is_added(&self) -> bool {
        self.status == ChangeStatus::Added
    }

    pub fn is_deleted(&self) -> bool {
        self.status == ChangeStatus::Deleted
    }

    /// Absolute location of the file in the working tree
    pub fn absolute_path(&self) -> PathBuf {
        self.repository.join(&self.path)
    }

    fn sort_key(&self) -> (ChangeStatus, &str, &Path) {
        (self.status, &self.path, &self.repository)
    }
}

/// Order changes by status, then path, then repository
pub fn sort_changes(changes: &mut [Change]) {
    changes.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}
