//! UnifiedError trait implementation for IterviewError

use super::types::{IterviewError, UnifiedError};

impl UnifiedError for IterviewError {
    fn error_code(&self) -> &str {
        match self {
            Self::Config { .. } => "ITERVIEW_CONFIG",
            Self::Io { .. } => "ITERVIEW_IO",
            Self::Json { .. } => "ITERVIEW_JSON",
            Self::Discovery { .. } => "ITERVIEW_DISCOVERY",
            Self::HashBatch { .. } => "ITERVIEW_HASH_BATCH",
            Self::Storage { .. } => "ITERVIEW_STORAGE",
            Self::NoRepositories { .. } => "ITERVIEW_NO_REPOSITORIES",
            Self::InvalidInput { .. } => "ITERVIEW_INVALID_INPUT",
            Self::NotFound { .. } => "ITERVIEW_NOT_FOUND",
            Self::Other { .. } => "ITERVIEW_OTHER",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Config { message, .. } => message,
            Self::Io { message, .. } => message,
            Self::Json { message, .. } => message,
            Self::Discovery { message, .. } => message,
            Self::HashBatch { message, .. } => message,
            Self::Storage { message, .. } => message,
            Self::NoRepositories { .. } => "No repositories found",
            Self::InvalidInput { message, .. } => message,
            Self::NotFound { message, .. } => message,
            Self::Other { message, .. } => message,
        }
    }

    fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. } => context.as_deref(),
            Self::Io { context, .. } => context.as_deref(),
            Self::Json { context, .. } => context.as_deref(),
            Self::Storage { context, .. } => context.as_deref(),
            Self::InvalidInput { field, .. } => field.as_deref(),
            Self::NotFound { resource_type, .. } => resource_type.as_deref(),
            Self::Other { context, .. } => context.as_deref(),
            Self::Discovery { .. } | Self::HashBatch { .. } | Self::NoRepositories { .. } => None,
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::HashBatch { .. } | Self::Discovery { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            IterviewError::storage("disk full").error_code(),
            "ITERVIEW_STORAGE"
        );
        assert_eq!(
            IterviewError::no_repositories("/tmp/x").error_code(),
            "ITERVIEW_NO_REPOSITORIES"
        );
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(IterviewError::hash_batch("/repo", "git exited 128").is_recoverable());
        assert!(IterviewError::discovery("fd missing", "/root").is_recoverable());
        assert!(!IterviewError::storage("write failed").is_recoverable());
    }

    #[test]
    fn test_display_includes_repository() {
        let err = IterviewError::hash_batch("/work/repo", "broken pipe");
        assert_eq!(
            err.to_string(),
            "Hash batch failed for /work/repo: broken pipe"
        );
    }

    #[test]
    fn test_context_helper() {
        let result: Result<(), String> = Err("boom".to_string());
        let err = crate::error::ResultExt::context(result, "loading manifest").unwrap_err();
        assert_eq!(err.message(), "loading manifest: boom");
    }
}
