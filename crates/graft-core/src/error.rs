//! Unified error handling for graft-core.
//!
//! Domain and application errors are wrapped into one root type. Failures
//! raised while a builder runs are wrapped once more in
//! [`GraftError::Scaffold`], which names the builder and the file it was
//! working on.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for graft-core operations.
#[derive(Debug, Error, Clone)]
pub enum GraftError {
    /// Errors from the domain layer (business rule violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (ports and orchestration).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// A builder failed; the run stopped here.
    #[error("Builder '{builder}' failed on {}: {cause}", path.display())]
    Scaffold {
        builder: String,
        path: PathBuf,
        cause: Box<GraftError>,
    },

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl GraftError {
    /// Wrap `cause` with the identity of the builder that raised it.
    pub fn scaffold(
        builder: impl Into<String>,
        path: impl Into<PathBuf>,
        cause: impl Into<GraftError>,
    ) -> Self {
        Self::Scaffold {
            builder: builder.into(),
            path: path.into(),
            cause: Box::new(cause.into()),
        }
    }

    /// The innermost error, looking through builder wrappers.
    pub fn root_cause(&self) -> &GraftError {
        match self {
            Self::Scaffold { cause, .. } => cause.root_cause(),
            other => other,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Scaffold { cause, .. } => {
                let mut suggestions = cause.suggestions();
                suggestions.push("Files written before the failure were kept; re-run after fixing".into());
                suggestions
            }
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check graft.toml and GRAFT_* environment variables".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in graft".into(),
                "Please report it together with the command you ran".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Conflict => ErrorCategory::Conflict,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Scaffold { cause, .. } => cause.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type GraftResult<T> = Result<T, GraftError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> GraftResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> GraftResult<T> {
        self.map_err(|e| GraftError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaffold_error_names_builder_and_path() {
        let err = GraftError::scaffold(
            "main-updater",
            "cmd/main.go",
            DomainError::MarkerNotFound {
                path: "cmd/main.go".into(),
                marker: "builder".into(),
            },
        );
        let text = err.to_string();
        assert!(text.contains("main-updater"));
        assert!(text.contains("cmd/main.go"));
        assert!(text.contains("builder"));
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn root_cause_looks_through_wrappers() {
        let inner = GraftError::from(DomainError::FileConflict {
            path: "a.go".into(),
        });
        let err = GraftError::scaffold("types", "a.go", inner);
        assert!(matches!(
            err.root_cause(),
            GraftError::Domain(DomainError::FileConflict { .. })
        ));
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let res: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = res.context("reading graft.toml").unwrap_err();
        assert!(matches!(err, GraftError::Internal { .. }));
        assert!(err.to_string().contains("reading graft.toml: boom"));
    }
}
