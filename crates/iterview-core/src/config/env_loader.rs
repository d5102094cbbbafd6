//! Environment variable overrides

use std::env;
use std::path::PathBuf;

use super::model::IterviewConfig;
use crate::error::{IterviewError, IterviewResult};

/// Apply `ITERVIEW_*` environment variables on top of `config`
pub fn apply_env_overrides(config: &mut IterviewConfig) -> IterviewResult<()> {
    apply_overrides_from(config, |key| env::var(key).ok())
}

/// Apply overrides from an arbitrary variable lookup
pub fn apply_overrides_from<F>(config: &mut IterviewConfig, lookup: F) -> IterviewResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("ITERVIEW_MAX_CHECKPOINTS") {
        config.max_checkpoints = value
            .trim()
            .parse()
            .map_err(|_| IterviewError::config("Invalid ITERVIEW_MAX_CHECKPOINTS value"))?;
    }

    if let Some(value) = lookup("ITERVIEW_STORAGE_DIR") {
        config.storage_dir = PathBuf::from(value);
    }

    if let Some(value) = lookup("ITERVIEW_MAX_DEPTH") {
        config.discovery.max_depth = value
            .trim()
            .parse()
            .map_err(|_| IterviewError::config("Invalid ITERVIEW_MAX_DEPTH value"))?;
    }

    if let Some(value) = lookup("ITERVIEW_AUTO_GITIGNORE") {
        config.auto_gitignore = match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                return Err(IterviewError::config(
                    "Invalid ITERVIEW_AUTO_GITIGNORE value",
                ));
            }
        };
    }

    if let Some(level) = lookup("ITERVIEW_LOG_LEVEL") {
        config.logging.level = level;
    }

    config.validate()
}
