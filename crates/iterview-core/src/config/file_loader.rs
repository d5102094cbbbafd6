//! File-based configuration loading

use std::fs;
use std::path::Path;

use super::model::IterviewConfig;
use crate::error::{IterviewError, IterviewResult};

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> IterviewResult<IterviewConfig> {
    if !path.exists() {
        return Ok(IterviewConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        IterviewError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    let config: IterviewConfig = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| {
            IterviewError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
            IterviewError::config_with_context(
                format!("Failed to parse YAML config: {}", e),
                format!("Deserializing YAML configuration from '{}'", path.display()),
            )
        })?,
        _ => serde_json::from_str(&content).map_err(|e| {
            IterviewError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        })?,
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_from_file(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(config, IterviewConfig::default());
    }

    #[test]
    fn test_load_from_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("iterview.json");
        fs::write(
            &config_path,
            r#"{
                "max_checkpoints": 3,
                "storage_dir": ".review",
                "auto_gitignore": false,
                "discovery": { "max_depth": 1, "exclude_dirs": ["vendor"] }
            }"#,
        )
        .unwrap();

        let config = load_from_file(&config_path).unwrap();
        assert_eq!(config.max_checkpoints, 3);
        assert_eq!(config.storage_dir, PathBuf::from(".review"));
        assert!(!config.auto_gitignore);
        assert_eq!(config.discovery.exclude_dirs, vec!["vendor".to_string()]);
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("iterview.toml");
        fs::write(
            &config_path,
            "max_checkpoints = 9\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = load_from_file(&config_path).unwrap();
        assert_eq!(config.max_checkpoints, 9);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("iterview.yaml");
        fs::write(&config_path, "discovery:\n  max_depth: 5\n").unwrap();

        let config = load_from_file(&config_path).unwrap();
        assert_eq!(config.discovery.max_depth, 5);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.json");
        fs::write(&config_path, "{ not json").unwrap();

        let err = load_from_file(&config_path).unwrap_err();
        assert!(matches!(err, IterviewError::Config { .. }));
    }

    #[test]
    fn test_zero_retention_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("zero.json");
        fs::write(&config_path, r#"{"max_checkpoints": 0}"#).unwrap();

        assert!(load_from_file(&config_path).is_err());
    }
}
