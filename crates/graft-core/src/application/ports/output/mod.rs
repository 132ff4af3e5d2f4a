//! Driven (output) ports - implemented by infrastructure.
//!
//! Paths handed to these ports are relative to the project root; the
//! adapter decides what that root is.

use std::path::Path;

use crate::domain::RenderContext;
use crate::error::GraftResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `graft_adapters::filesystem::LocalFilesystem` (production)
/// - `graft_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as text.
    fn read_file(&self, path: &Path) -> GraftResult<String>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> GraftResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> GraftResult<()>;
}

/// Port for template rendering.
///
/// Only parameterized bodies reach the renderer; literal bodies are written
/// as-is by the orchestrator.
///
/// Implemented by:
/// - `graft_adapters::renderer::HandlebarsRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render `body` against `context`.
    ///
    /// A reference to a field the context does not provide is an error.
    fn render(&self, body: &str, context: &RenderContext) -> GraftResult<String>;
}
