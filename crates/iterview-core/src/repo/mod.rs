//! Repository discovery and file enumeration

mod discovery;
mod lister;


pub use discovery::{RepoDiscovery, discover_repositories};
pub use lister::{FileLister, GitFileLister, WalkFileLister};
pub(crate) use lister::{relative_to_repo, without_storage_files};

/// Name of the working-tree marker (a directory, or a file for worktrees)
pub const REPO_MARKER: &str = ".git";
