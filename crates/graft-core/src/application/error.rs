//! Application layer errors.
//!
//! These errors come from the ports (rendering, filesystem) and from the
//! orchestration around them. Rule violations are `DomainError`s.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Template rendering failed, usually an unresolved context reference.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// A file the run depends on does not exist.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared adapter state is unusable (lock poisoned).
    #[error("Filesystem state is unavailable")]
    FilesystemLock,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RenderingFailed { reason } => vec![
                format!("Rendering failed: {}", reason),
                "A template referenced a field the render context does not provide".into(),
            ],
            Self::FileNotFound { path } => vec![
                format!("Expected {} to exist", path.display()),
                "Run `graft init` to create the project files first".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::FilesystemLock => vec!["Retry the command".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RenderingFailed { .. } => ErrorCategory::Internal,
            Self::FileNotFound { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } | Self::FilesystemLock => ErrorCategory::Internal,
        }
    }
}
