//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use iterview_core::CheckpointId;
use std::path::PathBuf;

/// Default configuration file name used across all CLI commands.
pub const DEFAULT_CONFIG_FILE: &str = "iterview_config.json";

#[derive(Parser)]
#[command(name = "iterview")]
#[command(about = "Iterview - checkpoint your repositories and review what changed since")]
#[command(
    long_about = r#"Iterview - checkpoint your repositories and review what changed since

USAGE:
  iterview create                # Record a checkpoint of every repository
  iterview changes               # What changed since the latest checkpoint
  iterview changes 3             # What changed since checkpoint 3
  iterview between 2 5           # What changed from checkpoint 2 to 5
  iterview diff --path src/lib.rs
  iterview cat 3 app src/lib.rs  # File content as of checkpoint 3

For detailed help: iterview --help"#
)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long = "config", default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config_file: String,

    /// Directory to checkpoint (defaults to the current directory)
    #[arg(long, env = "ITERVIEW_ROOT", global = true)]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Record a checkpoint of every repository under the root
    Create {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List checkpoints, newest first
    List {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the repositories and files recorded by a checkpoint
    Show {
        /// Checkpoint id
        id: CheckpointId,

        /// Print the full manifest as JSON
        #[arg(long)]
        json: bool,
    },

    /// Changes from a checkpoint to the working trees
    Changes {
        /// Checkpoint id (defaults to the latest)
        id: Option<CheckpointId>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Changes between two checkpoints
    Between {
        /// Older checkpoint id
        from: CheckpointId,

        /// Newer checkpoint id
        to: CheckpointId,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Unified diffs from a checkpoint to the working trees
    Diff {
        /// Checkpoint id (defaults to the latest)
        id: Option<CheckpointId>,

        /// Only show changes to this repo-relative path
        #[arg(long)]
        path: Option<String>,

        /// Only print insertion and deletion counts
        #[arg(long)]
        stat: bool,
    },

    /// Print a file as it was recorded by a checkpoint
    Cat {
        /// Checkpoint id
        id: CheckpointId,

        /// Repository, absolute or relative to the checkpoint root
        repo: PathBuf,

        /// Repo-relative file path
        path: String,
    },

    /// List the repositories found under the root
    Repos,

    /// Delete every checkpoint
    Clear {
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
}
