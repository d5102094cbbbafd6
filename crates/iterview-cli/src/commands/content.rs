//! Historical content commands

use iterview_core::{CheckpointId, CheckpointManager, IterviewError, IterviewResult};
use std::io::Write;
use std::path::Path;

use super::checkpoint_not_found;

/// Write a file's recorded content to stdout
pub async fn cat(
    manager: &CheckpointManager,
    id: CheckpointId,
    repo: &Path,
    path: &str,
) -> IterviewResult<()> {
    let Some(content) = manager.content_at(id, repo, path).await? else {
        if manager.get_checkpoint(id).await?.is_none() {
            return Err(checkpoint_not_found(id));
        }
        return Err(IterviewError::not_found_resource(
            format!(
                "{} did not exist in {} at checkpoint {}",
                path,
                repo.display(),
                id
            ),
            "file",
        ));
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&content)?;
    stdout.flush()?;
    Ok(())
}
