//! Scaffold Service - the orchestrator.
//!
//! Runs builders one at a time, in the order given:
//! 1. Check the builder's required facets
//! 2. Ask the builder for its spec and resolve the target path
//! 3. Template: render, apply the existence policy, write
//!    Inserter: read, inject at markers, write back if anything changed
//!
//! The first failure stops the run. Files written by earlier builders stay
//! on disk; re-running is safe because templates respect their policy and
//! injection skips fragments that are already present.

use std::fmt;
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{Builder, Filesystem, InserterBuilder, TemplateBuilder, TemplateRenderer},
    domain::{
        DomainValidator as validator, Facets, InserterSpec, Marker, RelativePath, TemplateBody,
        TemplateSpec, WriteDecision, enforce, inject, resolve_path,
    },
    error::{GraftError, GraftResult},
};

/// Path reported for failures that happen before a target is resolved.
const UNRESOLVED: &str = "<unresolved>";

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Created,
    Overwritten,
    Skipped,
    Updated,
    Unchanged,
}

impl FileAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Overwritten => "overwritten",
            Self::Skipped => "skipped",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        }
    }

    /// True if the file content on disk changed.
    pub fn wrote(&self) -> bool {
        matches!(self, Self::Created | Self::Overwritten | Self::Updated)
    }
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<WriteDecision> for FileAction {
    fn from(decision: WriteDecision) -> Self {
        match decision {
            WriteDecision::Create => Self::Created,
            WriteDecision::Overwrite => Self::Overwritten,
            WriteDecision::Skip => Self::Skipped,
        }
    }
}

/// Outcome of one builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub builder: String,
    pub path: RelativePath,
    pub action: FileAction,
}

impl FileOutcome {
    /// Human-readable progress line.
    pub fn message(&self) -> String {
        format!("{} {}", self.action, self.path)
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    outcomes: Vec<FileOutcome>,
}

impl ScaffoldReport {
    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    /// Paths touched, in run order.
    pub fn paths(&self) -> impl Iterator<Item = &RelativePath> {
        self.outcomes.iter().map(|o| &o.path)
    }

    pub fn messages(&self) -> Vec<String> {
        self.outcomes.iter().map(FileOutcome::message).collect()
    }

    pub fn outcome_for(&self, path: &str) -> Option<&FileOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.path.to_slash_string() == path)
    }

    /// Number of files whose content changed.
    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|o| o.action.wrote()).count()
    }
}

impl FromIterator<FileOutcome> for ScaffoldReport {
    fn from_iter<I: IntoIterator<Item = FileOutcome>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn TemplateRenderer>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(filesystem: Box<dyn Filesystem>, renderer: Box<dyn TemplateRenderer>) -> Self {
        Self {
            filesystem,
            renderer,
        }
    }

    /// Run `builders` in order against the supplied facets.
    #[instrument(skip_all, fields(builders = builders.len()))]
    pub fn execute(&self, facets: &Facets, builders: &[Builder]) -> GraftResult<ScaffoldReport> {
        let mut report = ScaffoldReport::default();

        for builder in builders {
            let outcome = self.run_builder(facets, builder).inspect_err(|e| {
                warn!(builder = builder.name(), error = %e, "Scaffold run aborted");
            })?;
            info!(
                builder = %outcome.builder,
                path = %outcome.path,
                action = %outcome.action,
                "{}",
                outcome.message()
            );
            report.outcomes.push(outcome);
        }

        info!(written = report.written(), "Scaffold completed");
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn run_builder(&self, facets: &Facets, builder: &Builder) -> GraftResult<FileOutcome> {
        let name = builder.name();
        facets
            .require(name, builder.required_facets())
            .map_err(|e| GraftError::scaffold(name, UNRESOLVED, e))?;

        match builder {
            Builder::Template(b) => self.run_template(facets, b.as_ref()),
            Builder::Inserter(b) => self.run_inserter(facets, b.as_ref()),
        }
    }

    fn run_template(
        &self,
        facets: &Facets,
        builder: &dyn TemplateBuilder,
    ) -> GraftResult<FileOutcome> {
        let name = builder.name();
        let spec = builder
            .template(facets)
            .map_err(|e| GraftError::scaffold(name, UNRESOLVED, e))?;
        let path = resolve_path(spec.path_pattern(), facets.resource(), facets.project())
            .map_err(|e| GraftError::scaffold(name, spec.path_pattern(), e))?;

        let action = self
            .apply_template(facets, &spec, &path)
            .map_err(|e| GraftError::scaffold(name, path.as_path(), e))?;

        Ok(FileOutcome {
            builder: name.to_string(),
            path,
            action,
        })
    }

    fn apply_template(
        &self,
        facets: &Facets,
        spec: &TemplateSpec,
        path: &RelativePath,
    ) -> GraftResult<FileAction> {
        validator::validate_template(spec, path)?;

        let content = match spec.body() {
            TemplateBody::Literal(text) => text.clone(),
            TemplateBody::Parameterized(body) => {
                let mut context = facets.render_context();
                for name in spec.markers() {
                    context = context.with_marker(&Marker::new(path.clone(), name.as_str())?);
                }
                self.renderer.render(body, &context)?
            }
        };

        let exists = self.filesystem.exists(path.as_path());
        let decision = enforce(path, exists, spec.policy(), spec.force())?;
        debug!(
            path = %path,
            exists,
            policy = %spec.policy(),
            force = spec.force(),
            ?decision,
            "Existence policy applied"
        );

        if decision.writes() {
            self.ensure_parent(path.as_path())?;
            self.filesystem.write_file(path.as_path(), &content)?;
        }
        Ok(decision.into())
    }

    fn run_inserter(
        &self,
        facets: &Facets,
        builder: &dyn InserterBuilder,
    ) -> GraftResult<FileOutcome> {
        let name = builder.name();
        let spec = builder
            .inserter(facets)
            .map_err(|e| GraftError::scaffold(name, UNRESOLVED, e))?;
        let path = resolve_path(spec.path_pattern(), facets.resource(), facets.project())
            .map_err(|e| GraftError::scaffold(name, spec.path_pattern(), e))?;

        let action = self
            .apply_inserter(&spec, &path)
            .map_err(|e| GraftError::scaffold(name, path.as_path(), e))?;

        Ok(FileOutcome {
            builder: name.to_string(),
            path,
            action,
        })
    }

    fn apply_inserter(&self, spec: &InserterSpec, path: &RelativePath) -> GraftResult<FileAction> {
        validator::validate_inserter(spec, path)?;

        let current = self.filesystem.read_file(path.as_path())?;
        let injection = inject(&current, path, spec)?;
        debug!(
            path = %path,
            inserted = injection.inserted,
            deduplicated = injection.deduplicated,
            "Fragments injected"
        );

        if !injection.changed() {
            return Ok(FileAction::Unchanged);
        }
        self.filesystem.write_file(path.as_path(), &injection.content)?;
        Ok(FileAction::Updated)
    }

    fn ensure_parent(&self, path: &Path) -> GraftResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                self.filesystem.create_dir_all(parent)
            }
            _ => Ok(()),
        }
    }
}
