//! Change review commands

use iterview_core::{Change, CheckpointId, CheckpointManager, IterviewError, IterviewResult};
use serde_json::json;

use super::{change_location, checkpoint_not_found};
use crate::console::CliConsole;

/// Changes from a checkpoint (the latest by default) to the working trees
pub async fn since(
    manager: &CheckpointManager,
    console: &CliConsole,
    id: Option<CheckpointId>,
    json: bool,
) -> IterviewResult<()> {
    let (id, changes) = resolve_changes(manager, id).await?;

    if json {
        let output = json!({ "checkpoint": id, "changes": changes });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    console.print_header(&format!("Changes since checkpoint #{}", id));
    print_changes(manager, console, &changes);
    Ok(())
}

/// Changes between two checkpoints
pub async fn between(
    manager: &CheckpointManager,
    console: &CliConsole,
    from: CheckpointId,
    to: CheckpointId,
    json: bool,
) -> IterviewResult<()> {
    let changes = match manager.changes_between(from, to).await? {
        Some(changes) => changes,
        None => {
            let missing = if manager.get_checkpoint(from).await?.is_none() {
                from
            } else {
                to
            };
            return Err(checkpoint_not_found(missing));
        }
    };

    if json {
        let output = json!({ "from": from, "to": to, "changes": changes });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    console.print_header(&format!("Changes from #{} to #{}", from, to));
    print_changes(manager, console, &changes);
    Ok(())
}

/// Unified diffs from a checkpoint to the working trees
pub async fn diff(
    manager: &CheckpointManager,
    console: &CliConsole,
    id: Option<CheckpointId>,
    path: Option<&str>,
    stat_only: bool,
) -> IterviewResult<()> {
    let (_, changes) = resolve_changes(manager, id).await?;
    let changes: Vec<Change> = changes
        .into_iter()
        .filter(|change| path.is_none_or(|p| change.path == p))
        .collect();

    if changes.is_empty() {
        console.success("No changes");
        return Ok(());
    }

    for change in &changes {
        let location = change_location(manager.project_root(), change);
        let diff = manager.diff_change(change).await?;

        if stat_only {
            console.print_stat(&location, &diff.stat);
        } else if diff.binary {
            println!("{}", diff.unified.trim_end());
        } else {
            console.print_diff(&diff.unified);
        }
    }
    Ok(())
}

async fn resolve_changes(
    manager: &CheckpointManager,
    id: Option<CheckpointId>,
) -> IterviewResult<(CheckpointId, Vec<Change>)> {
    match id {
        Some(id) => manager
            .changes_since(id)
            .await?
            .map(|changes| (id, changes))
            .ok_or_else(|| checkpoint_not_found(id)),
        None => manager.changes_since_latest().await?.ok_or_else(|| {
            IterviewError::not_found_resource(
                "No checkpoints yet. Run `iterview create` to record one.",
                "checkpoint",
            )
        }),
    }
}

fn print_changes(manager: &CheckpointManager, console: &CliConsole, changes: &[Change]) {
    if changes.is_empty() {
        console.success("No changes");
        return;
    }
    for change in changes {
        console.print_change(change.status, &change_location(manager.project_root(), change));
    }
    println!();
    println!("  {} changed files", changes.len());
}
