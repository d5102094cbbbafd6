//! Configuration loading and logging setup

use iterview_core::config::{apply_env_overrides, load_from_file};
use iterview_core::{IterviewConfig, IterviewResult, LoggingConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::args::DEFAULT_CONFIG_FILE;
use crate::console::CliConsole;

/// `~/.iterview/config.json`, consulted when no local file exists
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".iterview").join("config.json"))
}

/// Load the configuration for this invocation
///
/// The local file wins, then the global file, then defaults. Environment
/// overrides are applied last.
pub fn load_config(config_file: &str, console: &CliConsole) -> IterviewResult<IterviewConfig> {
    let local = Path::new(config_file);
    let mut config = if local.exists() {
        load_from_file(local)?
    } else {
        match global_config_path().filter(|path| path.exists()) {
            Some(path) => load_from_file(&path)?,
            None => {
                if config_file != DEFAULT_CONFIG_FILE {
                    console.warn(&format!(
                        "Configuration file not found: {}, using defaults",
                        config_file
                    ));
                }
                IterviewConfig::default()
            }
        }
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(logging: &LoggingConfig, verbose: bool) {
    let mut logging = logging.clone();
    if verbose {
        logging.merge(LoggingConfig {
            level: "debug".to_string(),
            format: String::new(),
        });
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("iterview_core={0},iterview={0}", logging.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        _ => builder.init(),
    }
}
