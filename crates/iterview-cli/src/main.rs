//! Iterview CLI application
//!
//! Records checkpoints of every repository under a directory and reports
//! what changed since, file by file.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/iterview-cli
//! ```

mod args;
mod commands;
mod console;
mod router;
mod settings;

use clap::Parser;
use iterview_core::{IterviewError, UnifiedError};
use std::process::ExitCode;

pub use args::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let console = console::CliConsole::new(cli.verbose);

    let config = match settings::load_config(&cli.config_file, &console) {
        Ok(config) => config,
        Err(e) => return report(&console, &e),
    };
    settings::init_logging(&config.logging, cli.verbose);

    match router::route(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&console, &e),
    }
}

fn report(console: &console::CliConsole, error: &IterviewError) -> ExitCode {
    console.error(&error.to_string());
    if let Some(context) = error.context() {
        console.info(context);
    }
    console.info(&format!("Error code: {}", error.error_code()));
    ExitCode::FAILURE
}
