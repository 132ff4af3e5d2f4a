//! graft-core - the scaffolding and marker-injection engine.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             graft-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ builds facets + builder list
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         ScaffoldService (orchestrator)  │
//! │  facets → resolve → render → policy     │
//! │         → write / read → inject → write │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     Ports: Filesystem, TemplateRenderer │
//! │     Builders: TemplateBuilder,          │
//! │               InserterBuilder           │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     graft-adapters (disk, memory,       │
//! │     handlebars, built-in builders)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use graft_core::prelude::*;
//! # fn run(fs: Box<dyn Filesystem>, renderer: Box<dyn TemplateRenderer>, builders: Vec<Builder>) -> GraftResult<()> {
//! let facets = Facets::new()
//!     .with_boilerplate("")
//!     .with_project(ProjectContext::new("example.com/op", "example.com"));
//!
//! let report = ScaffoldService::new(fs, renderer).execute(&facets, &builders)?;
//! for line in report.messages() {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod prelude {
    pub use crate::application::{
        Builder, FileAction, FileOutcome, Filesystem, InserterBuilder, ScaffoldReport,
        ScaffoldService, TemplateBuilder, TemplateRenderer,
    };
    pub use crate::domain::{
        ExistencePolicy, Facet, Facets, Fragment, InserterSpec, Layout, ProjectContext,
        RenderContext, ResourceDescriptor, SchemeRegistry, TemplateBody, TemplateSpec,
    };
    pub use crate::error::{GraftError, GraftResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
