//! From trait implementations for IterviewError conversions

use super::types::IterviewError;

impl From<std::io::Error> for IterviewError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for IterviewError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<toml::de::Error> for IterviewError {
    fn from(error: toml::de::Error) -> Self {
        Self::config(format!("Failed to parse TOML: {}", error))
    }
}

impl From<serde_yaml::Error> for IterviewError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::config(format!("Failed to parse YAML: {}", error))
    }
}

impl From<tokio::task::JoinError> for IterviewError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::Other {
            message: format!("Background task failed: {}", error),
            context: Some(if error.is_panic() { "panic" } else { "cancelled" }.to_string()),
        }
    }
}
