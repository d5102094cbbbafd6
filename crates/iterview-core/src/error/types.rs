//! Core error types and traits for Iterview

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Iterview operations
pub type IterviewResult<T> = Result<T, IterviewError>;

/// Uniform view over errors so front ends can present them consistently.
pub trait UnifiedError: std::error::Error + Send + Sync {
    /// Stable code for programmatic handling
    fn error_code(&self) -> &str;

    /// Human-readable message
    fn message(&self) -> &str;

    /// Optional context about where the error occurred
    fn context(&self) -> Option<&str> {
        None
    }

    /// Whether the engine degrades gracefully on this error
    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Extension trait for adding context to foreign results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C: std::fmt::Display>(self, context: C) -> IterviewResult<T>;

    /// Add context lazily (only evaluated on error)
    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> IterviewResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context<C: std::fmt::Display>(self, context: C) -> IterviewResult<T> {
        self.map_err(|e| IterviewError::other(format!("{}: {}", context, e)))
    }

    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> IterviewResult<T> {
        self.map_err(|e| IterviewError::other(format!("{}: {}", f(), e)))
    }
}

/// Main error type for Iterview
#[derive(Error, Debug, Clone)]
pub enum IterviewError {
    /// Configuration loading or validation failed
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// Filesystem errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        context: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        context: Option<String>,
    },

    /// Repository discovery failed
    #[error("Discovery error: {message}")]
    Discovery {
        message: String,
        root: Option<PathBuf>,
    },

    /// A batched hash call for one repository failed
    #[error("Hash batch failed for {}: {message}", repository.display())]
    HashBatch { repository: PathBuf, message: String },

    /// Manifest persistence errors
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        context: Option<String>,
    },

    /// No repository could be discovered under the requested root
    #[error("No repositories found under {}", root.display())]
    NoRepositories { root: PathBuf },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },

    /// Resource not found
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        resource_type: Option<String>,
    },

    /// Generic error with context
    #[error("Error: {message}")]
    Other {
        message: String,
        context: Option<String>,
    },
}
