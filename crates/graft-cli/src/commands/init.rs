//! `graft init`: record the project and scaffold its entrypoint.

use graft_adapters::{InitScaffolder, Scaffolder};
use graft_core::domain::Layout;
use tracing::{info, instrument};

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::{AppConfig, ProjectConfig, ProjectFile},
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(repo = %args.repo))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    mut config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let project_file = global.project_file();
    if project_file.exists() && !args.force {
        return Err(CliError::AlreadyInitialised { path: project_file });
    }
    validate(&args)?;

    // A forced re-init keeps the recorded vars and resources.
    let mut file = ProjectFile::read(&project_file).map_err(CliError::config)?;
    apply(&args, &mut config.project);
    apply(&args, &mut file.project);

    let facets = super::facets(&global, &config)?;
    output.header(&format!("Initialising {}...", config.project.repo))?;

    let report = InitScaffolder::new(args.force).scaffold(&super::service(&global), &facets)?;
    file.write(&project_file).map_err(CliError::config)?;
    info!(file = %project_file.display(), "Project recorded");

    output.report(&report)?;
    output.success(&format!("Project initialised in {}", global.project_dir.display()))?;
    output.print("Next: graft create api --group <group> --version <version> --kind <Kind>")?;
    Ok(())
}

/// Overlay the init flags on `project`. The boilerplate path is only
/// replaced when the flag is given.
fn apply(args: &InitArgs, project: &mut ProjectConfig) {
    project.repo = args.repo.clone();
    project.domain = args.domain.clone();
    project.project_name = args.project_name.clone();
    project.multi_group = args.multigroup;
    project.layout = if args.legacy_layout {
        Layout::Legacy
    } else {
        Layout::Nested
    };
    if let Some(boilerplate) = &args.boilerplate {
        project.boilerplate = boilerplate.clone();
    }
}

fn validate(args: &InitArgs) -> CliResult<()> {
    let invalid = |message: &str| CliError::InvalidInput {
        message: message.to_string(),
        source: None,
    };
    if args.repo.trim().is_empty() {
        return Err(invalid("--repo cannot be empty"));
    }
    if args.domain.trim().is_empty() {
        return Err(invalid("--domain cannot be empty"));
    }
    if args.repo.contains(char::is_whitespace) {
        return Err(invalid("--repo cannot contain whitespace"));
    }
    Ok(())
}
