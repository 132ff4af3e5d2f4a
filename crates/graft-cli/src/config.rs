//! Project configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the facets built from
//! it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `GRAFT_*` environment variables, `__` between nested keys
//!    (`GRAFT_PROJECT__DOMAIN=example.com`)
//! 3. The project file (`graft.toml`, or `--config`)
//! 4. The user file in the platform config dir
//! 5. Built-in defaults

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use graft_core::domain::{
    DomainError, Layout, ProjectContext, ResourceDescriptor, SchemeRegistry,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const PROJECT_FILE: &str = "graft.toml";

const ENV_PREFIX: &str = "GRAFT";

/// Effective configuration for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub project: ProjectConfig,
    pub output: OutputConfig,
    /// Free-form strings exposed to templates as `vars.<key>`.
    pub vars: BTreeMap<String, String>,
    /// Every resource scaffolded so far, in creation order.
    pub resources: Vec<ResourceConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub repo: String,
    pub domain: String,
    pub project_name: Option<String>,
    pub multi_group: bool,
    pub layout: Layout,
    /// Header file, relative to the project dir.
    pub boilerplate: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            repo: String::new(),
            domain: String::new(),
            project_name: None,
            multi_group: false,
            layout: Layout::Nested,
            boilerplate: PathBuf::from("hack/boilerplate.go.txt"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

/// One scaffolded resource and what has been generated for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub group: String,
    pub version: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    pub cluster_scoped: bool,
    pub api: bool,
    pub controller: bool,
    pub webhook: bool,
}

impl ResourceConfig {
    fn same_gvk(&self, other: &ResourceConfig) -> bool {
        self.group == other.group && self.version == other.version && self.kind == other.kind
    }

    /// Rebuild the descriptor for this entry under `project`'s domain.
    pub fn descriptor(&self, project: &ProjectConfig) -> Result<ResourceDescriptor, DomainError> {
        let mut builder = ResourceDescriptor::builder()
            .group(&self.group)
            .version(&self.version)
            .kind(&self.kind)
            .domain(&project.domain)
            .cluster_scoped(self.cluster_scoped);
        if let Some(plural) = &self.plural {
            builder = builder.plural(plural);
        }
        builder.build()
    }
}

/// The sections `graft.toml` owns on disk.
///
/// Commands write through this type rather than [`AppConfig`], so values
/// that came from the environment or the user file never land in the
/// project file. Tables graft does not know about are kept as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFile {
    pub project: ProjectConfig,
    pub vars: BTreeMap<String, String>,
    pub resources: Vec<ResourceConfig>,
    #[serde(flatten)]
    pub other: toml::Table,
}

impl ProjectFile {
    /// Read `path` on its own, without any other configuration layer.
    /// A missing file reads as empty.
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Persist to `path` as TOML.
    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self).context("encoding project file")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
    }

    /// Merge `resource` into the recorded list. Flags only ever switch on.
    pub fn record_resource(&mut self, resource: ResourceConfig) {
        match self.resources.iter_mut().find(|r| r.same_gvk(&resource)) {
            Some(existing) => {
                existing.api |= resource.api;
                existing.controller |= resource.controller;
                existing.webhook |= resource.webhook;
                existing.cluster_scoped |= resource.cluster_scoped;
                if resource.plural.is_some() {
                    existing.plural = resource.plural;
                }
            }
            None => self.resources.push(resource),
        }
    }
}

impl AppConfig {
    /// Load configuration for the project file at `project_file`.
    ///
    /// A missing project file is not an error here; commands that need an
    /// initialised project check [`AppConfig::is_initialised`].
    pub fn load(project_file: &Path) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default()).context("encoding defaults")?);

        if let Some(user) = Self::user_config_path() {
            builder = builder.add_source(File::from(user).format(FileFormat::Toml).required(false));
        }

        let cfg = builder
            .add_source(
                File::from(project_file)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("reading {}", project_file.display()))?;

        let config: AppConfig = cfg
            .try_deserialize()
            .with_context(|| format!("parsing {}", project_file.display()))?;
        debug!(
            file = %project_file.display(),
            resources = config.resources.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// True once `graft init` has recorded a project.
    pub fn is_initialised(&self) -> bool {
        !self.project.repo.is_empty() && !self.project.domain.is_empty()
    }

    pub fn project_context(&self) -> ProjectContext {
        let p = &self.project;
        let mut ctx = ProjectContext::new(&p.repo, &p.domain)
            .with_multi_group(p.multi_group)
            .with_layout(p.layout);
        if let Some(name) = &p.project_name {
            ctx = ctx.with_project_name(name);
        }
        ctx
    }

    /// Scheme entries for every recorded resource with an API package.
    pub fn scheme(&self) -> Result<SchemeRegistry, DomainError> {
        let project = self.project_context();
        let mut scheme = SchemeRegistry::new();
        for entry in self.resources.iter().filter(|r| r.api) {
            scheme.register_resource(&entry.descriptor(&self.project)?, &project);
        }
        Ok(scheme)
    }

    /// The recorded entry for `group/version/kind`, if any.
    pub fn recorded(&self, resource: &ResourceConfig) -> Option<&ResourceConfig> {
        self.resources.iter().find(|r| r.same_gvk(resource))
    }

    /// Look up a dotted key in the effective configuration.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut value = toml::Value::try_from(self).ok()?;
        for part in key.split('.') {
            value = value.get(part)?.clone();
        }
        Some(match value {
            toml::Value::String(s) => s,
            other => other.to_string(),
        })
    }

    /// Per-user configuration file, if the platform has a config dir.
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("io", "graft", "graft")
            .map(|d| d.config_dir().join("config.toml"))
    }
}
