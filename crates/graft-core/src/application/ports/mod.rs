//! Application ports (traits) for external dependencies.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the orchestrator, implemented by
//!   infrastructure in `graft-adapters`
//!   - `Filesystem`: read, write and probe project files
//!   - `TemplateRenderer`: expand parameterized bodies
//!
//! - **Driving (Input) Ports**: the builders the orchestrator runs
//!   - `TemplateBuilder`: produces a new file
//!   - `InserterBuilder`: updates an existing file at its markers

pub mod input;
pub mod output;

pub use input::{Builder, InserterBuilder, TemplateBuilder};
pub use output::{Filesystem, TemplateRenderer};
