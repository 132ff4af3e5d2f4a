//! Infrastructure adapters for graft.
//!
//! This crate implements the ports defined in `graft-core::application::ports`
//! and ships the built-in builders and scaffolders.

pub mod builtin_templates;
pub mod filesystem;
pub mod renderer;
pub mod scaffolds;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::HandlebarsRenderer;
pub use scaffolds::{ApiScaffolder, InitScaffolder, Scaffolder, WebhookScaffolder};
