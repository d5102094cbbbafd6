//! Checkpoint management commands

use chrono::Local;
use colored::*;
use iterview_core::{CheckpointId, CheckpointManager, IterviewResult};

use super::checkpoint_not_found;
use crate::console::CliConsole;

/// Record a checkpoint
pub async fn create(manager: &CheckpointManager, console: &CliConsole, json: bool) -> IterviewResult<()> {
    let created = manager.create_checkpoint().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&created)?);
        return Ok(());
    }

    console.success(&format!(
        "Created checkpoint {} ({} files in {} repositories)",
        created.id, created.file_count, created.repository_count
    ));
    Ok(())
}

/// List checkpoints, newest first
pub async fn list(manager: &CheckpointManager, console: &CliConsole, json: bool) -> IterviewResult<()> {
    let summaries = manager.list_checkpoints().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    console.print_header("Checkpoints");
    if summaries.is_empty() {
        console.warn("No checkpoints yet. Run `iterview create` to record one.");
        return Ok(());
    }

    for summary in summaries {
        println!(
            "  {} {}  {} files, {} repositories",
            format!("#{}", summary.id).cyan().bold(),
            summary
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .dimmed(),
            summary.file_count,
            summary.repository_count
        );
    }
    Ok(())
}

/// Show one checkpoint
pub async fn show(
    manager: &CheckpointManager,
    console: &CliConsole,
    id: CheckpointId,
    json: bool,
) -> IterviewResult<()> {
    let manifest = manager
        .get_checkpoint(id)
        .await?
        .ok_or_else(|| checkpoint_not_found(id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
        return Ok(());
    }

    console.print_header(&format!("Checkpoint #{}", manifest.id));
    println!(
        "  Created: {}",
        manifest.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    );
    println!("  Root:    {}", manifest.root.display());
    println!("  Files:   {}", manifest.file_count());

    for (repo, snapshot) in &manifest.repositories {
        println!();
        println!(
            "  {} ({} files)",
            repo.display().to_string().bold(),
            snapshot.file_count()
        );
        for (path, record) in &snapshot.files {
            let short = record.content_hash.get(..10).unwrap_or(&record.content_hash);
            println!("    {} {}", short.dimmed(), path);
        }
    }
    Ok(())
}

/// List discovered repositories
pub async fn repos(manager: &CheckpointManager, console: &CliConsole) -> IterviewResult<()> {
    let repos = manager.repositories().await?;

    console.print_header("Repositories");
    if repos.is_empty() {
        console.warn(&format!(
            "No repositories found under {}",
            manager.project_root().display()
        ));
        return Ok(());
    }
    for repo in repos {
        println!("  {}", repo.display());
    }
    Ok(())
}

/// Delete every checkpoint
pub async fn clear(manager: &CheckpointManager, console: &CliConsole, yes: bool) -> IterviewResult<()> {
    if !yes && !console.confirm("Delete all checkpoints? This cannot be undone")? {
        console.warn("Aborted");
        return Ok(());
    }

    let count = manager.clear_all().await?;
    console.success(&format!("Deleted {} checkpoints", count));
    Ok(())
}
