//! Command routing logic for CLI

use iterview_core::{CheckpointManager, IterviewConfig, IterviewResult, ResultExt};

use crate::args::{Cli, Commands};
use crate::commands;
use crate::console::CliConsole;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli, config: IterviewConfig) -> IterviewResult<()> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let manager = CheckpointManager::new(&root, config)?;
    let console = CliConsole::new(cli.verbose);
    tracing::debug!("Using project root {}", manager.project_root().display());

    match cli.command {
        Commands::Create { json } => commands::checkpoint::create(&manager, &console, json).await,
        Commands::List { json } => commands::checkpoint::list(&manager, &console, json).await,
        Commands::Show { id, json } => {
            commands::checkpoint::show(&manager, &console, id, json).await
        }
        Commands::Changes { id, json } => {
            commands::changes::since(&manager, &console, id, json).await
        }
        Commands::Between { from, to, json } => {
            commands::changes::between(&manager, &console, from, to, json).await
        }
        Commands::Diff { id, path, stat } => {
            commands::changes::diff(&manager, &console, id, path.as_deref(), stat).await
        }
        Commands::Cat { id, repo, path } => {
            commands::content::cat(&manager, id, &repo, &path).await
        }
        Commands::Repos => commands::checkpoint::repos(&manager, &console).await,
        Commands::Clear { yes } => commands::checkpoint::clear(&manager, &console, yes).await,
    }
}
