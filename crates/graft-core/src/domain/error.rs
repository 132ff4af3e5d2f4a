// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so the orchestrator can attach them to a builder report)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("Invalid marker '{name}': {reason}")]
    InvalidMarker { name: String, reason: String },

    #[error("Builder '{builder}' requires the {facet} facet, which was not supplied")]
    MissingFacet {
        builder: String,
        facet: &'static str,
    },

    #[error("Cannot resolve path pattern '{pattern}': {reason}")]
    PathResolution { pattern: String, reason: String },

    // ========================================================================
    // Conflict Errors
    // ========================================================================
    #[error("File {path} already exists")]
    FileConflict { path: PathBuf },

    // ========================================================================
    // Anchor Errors
    // ========================================================================
    #[error("Marker '{marker}' not found in {path}")]
    MarkerNotFound { path: PathBuf, marker: String },

    #[error("Marker '{marker}' appears {count} times in {path}")]
    DuplicateMarker {
        path: PathBuf,
        marker: String,
        count: usize,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidResource(msg) => vec![
                "Check the --group, --version and --kind values".into(),
                format!("Details: {}", msg),
            ],
            Self::FileConflict { path } => vec![
                format!("{} is meant to keep your edits", path.display()),
                "Use --force to regenerate it (destructive)".into(),
            ],
            Self::MarkerNotFound { path, marker } => vec![
                format!(
                    "Restore the '{}' scaffold marker comment in {}",
                    marker,
                    path.display()
                ),
                "Markers are never recreated automatically; re-add the line by hand".into(),
            ],
            Self::DuplicateMarker { path, marker, .. } => vec![
                format!(
                    "Keep exactly one '{}' marker line in {}",
                    marker,
                    path.display()
                ),
            ],
            Self::MissingFacet { facet, .. } => vec![
                format!("Provide the {} before scaffolding", facet),
                "Run `graft init` first if the project has no graft.toml".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidResource(_) | Self::InvalidMarker { .. } => ErrorCategory::Validation,
            Self::MissingFacet { .. } => ErrorCategory::Validation,
            Self::FileConflict { .. } => ErrorCategory::Conflict,
            Self::MarkerNotFound { .. } | Self::DuplicateMarker { .. } => ErrorCategory::NotFound,
            Self::PathResolution { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Internal,
}
