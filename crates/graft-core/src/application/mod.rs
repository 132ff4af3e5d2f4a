//! Application layer for graft.
//!
//! This layer contains:
//! - **Services**: the scaffold orchestrator
//! - **Ports**: builder traits and the filesystem/renderer interfaces
//! - **Errors**: application-specific error types
//!
//! All rules about paths, policies and markers live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{FileAction, FileOutcome, ScaffoldReport, ScaffoldService};

pub use ports::{Builder, Filesystem, InserterBuilder, TemplateBuilder, TemplateRenderer};

pub use error::ApplicationError;
