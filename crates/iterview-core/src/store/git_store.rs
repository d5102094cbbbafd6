//! Content store backed by a repository's own git object database

use async_trait::async_trait;
use std::path::Path;

use super::{ContentStore, check_batch_len};
use crate::error::{IterviewError, IterviewResult};
use crate::git;

/// Hashes with `git hash-object` and reads with `git cat-file`
///
/// Blobs land in the object database of the repository they came from, so
/// reads must name the same repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitContentStore;

impl GitContentStore {
    pub fn new() -> Self {
        Self
    }

    fn hash_args(write: bool) -> Vec<&'static str> {
        let mut args = vec!["hash-object", "--no-filters", "--stdin-paths"];
        if write {
            args.push("-w");
        }
        args
    }
}

#[async_trait]
impl ContentStore for GitContentStore {
    async fn hash_paths(
        &self,
        repo: &Path,
        paths: &[String],
        write: bool,
    ) -> IterviewResult<Vec<String>> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        let args = Self::hash_args(write);
        let output = git::run(repo, &args, Some(git::paths_to_stdin(paths)))
            .await
            .map_err(|e| IterviewError::hash_batch(repo, e.to_string()))?;
        check_batch_len(repo, paths, git::split_lines(&output))
    }

    fn hash_paths_blocking(
        &self,
        repo: &Path,
        paths: &[String],
        write: bool,
    ) -> IterviewResult<Vec<String>> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        let args = Self::hash_args(write);
        let output = git::run_blocking(repo, &args, Some(&git::paths_to_stdin(paths)))
            .map_err(|e| IterviewError::hash_batch(repo, e.to_string()))?;
        check_batch_len(repo, paths, git::split_lines(&output))
    }

    async fn read_blob(&self, repo: &Path, hash: &str) -> IterviewResult<Option<Vec<u8>>> {
        if hash.is_empty() || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(None);
        }

        let object = format!("{}^{{blob}}", hash);
        if git::run(repo, &["cat-file", "-e", &object], None).await.is_err() {
            return Ok(None);
        }

        let content = git::run(repo, &["cat-file", "blob", hash], None).await?;
        Ok(Some(content))
    }
}
