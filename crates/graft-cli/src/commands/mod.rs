//! Command handlers.
//!
//! Each handler translates arguments into facets, hands a scaffolder to the
//! core service and prints the report. No scaffolding logic lives here.

pub mod completions;
pub mod config;
pub mod create;
pub mod init;

use std::path::PathBuf;

use graft_adapters::{HandlebarsRenderer, LocalFilesystem};
use graft_core::{application::ScaffoldService, domain::Facets, error::GraftError};
use tracing::debug;

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Service rooted at the project directory.
fn service(global: &GlobalArgs) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(LocalFilesystem::new(&global.project_dir)),
        Box::new(HandlebarsRenderer::new()),
    )
}

/// The project file, provided `graft init` has run.
fn require_project(global: &GlobalArgs, config: &AppConfig) -> CliResult<PathBuf> {
    let path = global.project_file();
    if !config.is_initialised() {
        return Err(CliError::NotInitialised { path });
    }
    Ok(path)
}

/// Header text for generated Go files; empty when the file is absent.
fn boilerplate(global: &GlobalArgs, config: &AppConfig) -> CliResult<String> {
    let path = global.project_dir.join(&config.project.boilerplate);
    if !path.is_file() {
        debug!(path = %path.display(), "No boilerplate file; generating without a header");
        return Ok(String::new());
    }
    let text = std::fs::read_to_string(&path).map_err(|e| CliError::IoError {
        message: format!("Failed to read boilerplate '{}'", path.display()),
        source: e,
    })?;
    Ok(text.trim_end().to_string())
}

/// Project-wide facets shared by every command.
fn facets(global: &GlobalArgs, config: &AppConfig) -> CliResult<Facets> {
    let scheme = config.scheme().map_err(GraftError::from)?;
    let mut facets = Facets::new()
        .with_boilerplate(boilerplate(global, config)?)
        .with_project(config.project_context())
        .with_scheme(scheme);
    for (key, value) in &config.vars {
        facets = facets.with_variable(key, value);
    }
    Ok(facets)
}
