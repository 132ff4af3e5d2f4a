//! Resource descriptor: the group/version/kind being scaffolded.
//!
//! The descriptor is supplied once per invocation and never changes during a
//! run. Naming rules beyond the derived aliases below (pluralisation of odd
//! kinds, reserved group names) belong to the caller.

use std::fmt;

use serde::Serialize;

use crate::domain::{entities::project::ProjectContext, error::DomainError};

/// Immutable description of one API resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDescriptor {
    group: String,
    version: String,
    kind: String,
    plural: String,
    domain: String,
    namespaced: bool,
    regular_plural: bool,
    api_path: Option<String>,
}

impl ResourceDescriptor {
    /// Start building a descriptor.
    pub fn builder() -> ResourceDescriptorBuilder {
        ResourceDescriptorBuilder::default()
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn is_namespaced(&self) -> bool {
        self.namespaced
    }

    pub fn is_regular_plural(&self) -> bool {
        self.regular_plural
    }

    pub fn has_group(&self) -> bool {
        !self.group.is_empty()
    }

    /// Go import alias for the API package, e.g. `batchv1`.
    ///
    /// Core resources (empty group) fall back to the domain.
    pub fn import_alias(&self) -> String {
        let base = if self.has_group() {
            &self.group
        } else {
            &self.domain
        };
        safe_import(&format!("{base}{}", self.version))
    }

    /// Package name used to qualify per-group controller packages.
    pub fn package_name(&self) -> String {
        if self.has_group() {
            safe_import(&self.group)
        } else {
            safe_import(&self.domain)
        }
    }

    /// Fully qualified API group (`group.domain`).
    pub fn qualified_group(&self) -> String {
        match (self.has_group(), self.domain.is_empty()) {
            (true, false) => format!("{}.{}", self.group, self.domain),
            (true, true) => self.group.clone(),
            (false, _) => self.domain.clone(),
        }
    }

    /// Import path of the API package inside the project module.
    ///
    /// An explicit path given at construction wins; otherwise it is derived
    /// from the repo, with a group segment only in multi-group projects.
    pub fn api_import_path(&self, project: &ProjectContext) -> String {
        if let Some(path) = &self.api_path {
            return path.clone();
        }
        if project.is_multi_group() && self.has_group() {
            format!("{}/api/{}/{}", project.repo(), self.group, self.version)
        } else {
            format!("{}/api/{}", project.repo(), self.version)
        }
    }

    /// Substitute `%[...]` resource placeholders in `input`.
    ///
    /// Unknown placeholders are left untouched; the path resolver reports
    /// them.
    pub fn replace(&self, input: &str) -> String {
        input
            .replace("%[group]", &self.group.to_lowercase())
            .replace("%[version]", &self.version.to_lowercase())
            .replace("%[kind]", &self.kind.to_lowercase())
            .replace("%[Kind]", &self.kind)
            .replace("%[plural]", &self.plural)
            .replace("%[package-name]", &self.package_name())
            .replace("%[domain]", &self.domain)
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}, Kind={}", self.qualified_group(), self.version, self.kind)
    }
}

fn safe_import(unsafe_name: &str) -> String {
    unsafe_name.replace(['-', '.'], "").to_lowercase()
}

fn default_plural(kind: &str) -> String {
    format!("{}s", kind.to_lowercase())
}

/// Builder for [`ResourceDescriptor`].
#[derive(Debug, Default)]
pub struct ResourceDescriptorBuilder {
    group: Option<String>,
    version: Option<String>,
    kind: Option<String>,
    plural: Option<String>,
    domain: Option<String>,
    cluster_scoped: bool,
    api_path: Option<String>,
}

impl ResourceDescriptorBuilder {
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn cluster_scoped(mut self, cluster_scoped: bool) -> Self {
        self.cluster_scoped = cluster_scoped;
        self
    }

    pub fn api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<ResourceDescriptor, DomainError> {
        let kind = self.kind.unwrap_or_default();
        if kind.is_empty() {
            return Err(DomainError::InvalidResource("kind is required".into()));
        }
        if !kind.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
            return Err(DomainError::InvalidResource(format!(
                "kind '{kind}' must start with an uppercase letter"
            )));
        }

        let version = self.version.unwrap_or_default();
        if version.is_empty() {
            return Err(DomainError::InvalidResource("version is required".into()));
        }

        let group = self.group.unwrap_or_default();
        if group.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(DomainError::InvalidResource(format!(
                "group '{group}' cannot contain whitespace or '/'"
            )));
        }

        let regular = default_plural(&kind);
        let plural = self.plural.unwrap_or_else(|| regular.clone());

        Ok(ResourceDescriptor {
            regular_plural: plural == regular,
            group,
            version,
            kind,
            plural,
            domain: self.domain.unwrap_or_default(),
            namespaced: !self.cluster_scoped,
            api_path: self.api_path,
        })
    }
}
