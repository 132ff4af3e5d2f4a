//! `graft create api` and `graft create webhook`.

use std::path::Path;

use graft_adapters::{ApiScaffolder, Scaffolder, WebhookScaffolder};
use graft_core::error::GraftError;
use tracing::{info, instrument};

use crate::{
    cli::{ApiArgs, CreateCommands, GlobalArgs, ResourceArgs, WebhookArgs},
    config::{AppConfig, ProjectFile, ResourceConfig},
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    cmd: CreateCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        CreateCommands::Api(args) => api(args, global, config, output),
        CreateCommands::Webhook(args) => webhook(args, global, config, output),
    }
}

fn entry(args: &ResourceArgs) -> ResourceConfig {
    ResourceConfig {
        group: args.group.clone(),
        version: args.api_version.clone(),
        kind: args.kind.clone(),
        ..ResourceConfig::default()
    }
}

#[instrument(skip_all, fields(kind = %args.resource.kind))]
fn api(args: ApiArgs, global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let project_file = super::require_project(&global, &config)?;
    if args.no_resource && args.no_controller {
        return Err(CliError::InvalidInput {
            message: "--no-resource and --no-controller leave nothing to scaffold".into(),
            source: None,
        });
    }

    let entry = ResourceConfig {
        plural: args.plural,
        cluster_scoped: args.cluster_scoped,
        api: !args.no_resource,
        controller: !args.no_controller,
        ..entry(&args.resource)
    };
    let resource = entry
        .descriptor(&config.project)
        .map_err(GraftError::from)?;
    let facets = super::facets(&global, &config)?.with_resource(resource.clone());

    output.header(&format!("Creating API {resource}..."))?;
    let scaffolder = ApiScaffolder {
        resource: entry.api,
        controller: entry.controller,
        force: args.force,
    };
    let report = scaffolder.scaffold(&super::service(&global), &facets)?;

    record(&project_file, entry)?;
    info!(resource = %resource, written = report.written(), "API created");

    output.report(&report)?;
    output.success(&format!("API {resource} created"))?;
    Ok(())
}

#[instrument(skip_all, fields(kind = %args.resource.kind))]
fn webhook(
    args: WebhookArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let project_file = super::require_project(&global, &config)?;
    let entry = ResourceConfig {
        webhook: true,
        ..entry(&args.resource)
    };
    let recorded = config.recorded(&entry);
    if !recorded.is_some_and(|r| r.api) {
        output.warning(&format!(
            "No API recorded for {}; the webhook setup references its package",
            entry.kind
        ))?;
    }
    // Scope and plural come from the recorded API when there is one.
    let entry = match recorded {
        Some(r) => ResourceConfig {
            plural: r.plural.clone(),
            cluster_scoped: r.cluster_scoped,
            ..entry
        },
        None => entry,
    };

    let resource = entry
        .descriptor(&config.project)
        .map_err(GraftError::from)?;
    let facets = super::facets(&global, &config)?.with_resource(resource.clone());

    output.header(&format!("Creating webhook for {resource}..."))?;
    let report =
        WebhookScaffolder::new(args.force).scaffold(&super::service(&global), &facets)?;

    record(&project_file, entry)?;
    info!(resource = %resource, written = report.written(), "Webhook created");

    output.report(&report)?;
    output.success(&format!("Webhook for {resource} created"))?;
    Ok(())
}

/// Add `entry` to the project file, leaving every other setting as written.
fn record(project_file: &Path, entry: ResourceConfig) -> CliResult<()> {
    let mut file = ProjectFile::read(project_file).map_err(CliError::config)?;
    file.record_resource(entry);
    file.write(project_file).map_err(CliError::config)
}
