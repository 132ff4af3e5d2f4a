//! Template specifications and the render context.
//!
//! A [`TemplateSpec`] describes a file the engine may create: where it goes
//! (a path pattern), what goes in it (a body), which markers the body plants
//! and what to do when the file is already there.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ TemplateSpec                                               │
//! │ ├── path_pattern    "api/%[group]/%[version]/%[kind]_types.go"
//! │ ├── body            Literal | Parameterized                │
//! │ ├── markers         ["imports", "scheme", "builder"]       │
//! │ ├── policy          Skip | Overwrite | Error               │
//! │ └── force           reclassifies Skip/Error as Overwrite   │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Literal vs Parameterized
//!
//! Literal bodies are written byte-for-byte and never reach the renderer.
//! Helm chart files need this: their own `{{ .Values }}` syntax would be
//! misread by any mustache-style engine.
//!
//! ## Render context
//!
//! [`RenderContext`] is the data a parameterized body is rendered against.
//! It serialises to a tree with these top-level keys:
//!
//! | Key | Content |
//! |-----|---------|
//! | `boilerplate` | caller-supplied header text |
//! | `resource` | descriptor fields plus `import_alias`, `package_name`, `cluster_scoped`, `irregular_plural`, `path` |
//! | `project` | `repo`, `domain`, `project_name`, `multi_group`, `layout` |
//! | `markers` | sentinel line per marker name the template plants |
//! | `scheme` | registered `{alias, path}` API packages |
//! | `vars` | free-form caller variables |
//!
//! Keys whose facet was not supplied are absent, so a strict renderer
//! reports a reference to them instead of printing an empty string.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::domain::entities::{
    marker::Marker, project::ProjectContext, resource::ResourceDescriptor,
    scheme::SchemeRegistry,
};

/// What to do when a template's target file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExistencePolicy {
    /// Leave the existing file alone and report success.
    #[default]
    Skip,
    /// Replace the file content entirely.
    Overwrite,
    /// Abort the run with a file conflict.
    Error,
}

impl fmt::Display for ExistencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Skip => "skip",
            Self::Overwrite => "overwrite",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// Template body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateBody {
    /// Written as-is.
    Literal(String),
    /// Rendered against the [`RenderContext`].
    Parameterized(String),
}

impl TemplateBody {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(s) | Self::Parameterized(s) => s,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// How to create a file that does not exist yet, or treat one that does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpec {
    path_pattern: String,
    body: TemplateBody,
    markers: Vec<String>,
    policy: ExistencePolicy,
    force: bool,
}

impl TemplateSpec {
    pub fn new(path_pattern: impl Into<String>, body: TemplateBody) -> Self {
        Self {
            path_pattern: path_pattern.into(),
            body,
            markers: Vec::new(),
            policy: ExistencePolicy::default(),
            force: false,
        }
    }

    /// Shorthand for a parameterized body.
    pub fn parameterized(path_pattern: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(path_pattern, TemplateBody::Parameterized(body.into()))
    }

    /// Shorthand for a literal body.
    pub fn literal(path_pattern: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(path_pattern, TemplateBody::Literal(body.into()))
    }

    /// Declare a marker the body plants via `{{markers.<name>}}`.
    pub fn with_marker(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.markers.contains(&name) {
            self.markers.push(name);
        }
        self
    }

    pub fn with_policy(mut self, policy: ExistencePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn path_pattern(&self) -> &str {
        &self.path_pattern
    }

    pub fn body(&self) -> &TemplateBody {
        &self.body
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn policy(&self) -> ExistencePolicy {
        self.policy
    }

    pub fn force(&self) -> bool {
        self.force
    }
}

/// Resource fields as seen by templates, derived values included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceView {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub plural: String,
    pub domain: String,
    pub qualified_group: String,
    pub namespaced: bool,
    pub cluster_scoped: bool,
    pub regular_plural: bool,
    pub irregular_plural: bool,
    pub import_alias: String,
    pub package_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ResourceView {
    pub fn new(resource: &ResourceDescriptor, project: Option<&ProjectContext>) -> Self {
        Self {
            group: resource.group().to_string(),
            version: resource.version().to_string(),
            kind: resource.kind().to_string(),
            plural: resource.plural().to_string(),
            domain: resource.domain().to_string(),
            qualified_group: resource.qualified_group(),
            namespaced: resource.is_namespaced(),
            cluster_scoped: !resource.is_namespaced(),
            regular_plural: resource.is_regular_plural(),
            irregular_plural: !resource.is_regular_plural(),
            import_alias: resource.import_alias(),
            package_name: resource.package_name(),
            path: project.map(|p| resource.api_import_path(p)),
        }
    }
}

/// Data a parameterized template body is rendered against.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    boilerplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<ResourceView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<ProjectContext>,
    markers: BTreeMap<String, String>,
    scheme: SchemeRegistry,
    vars: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boilerplate(mut self, boilerplate: impl Into<String>) -> Self {
        self.boilerplate = Some(boilerplate.into());
        self
    }

    pub fn with_project(mut self, project: ProjectContext) -> Self {
        self.project = Some(project);
        self
    }

    /// Expose a resource. Pass the project so `resource.path` can be derived.
    pub fn with_resource(
        mut self,
        resource: &ResourceDescriptor,
        project: Option<&ProjectContext>,
    ) -> Self {
        self.resource = Some(ResourceView::new(resource, project));
        self
    }

    pub fn with_scheme(mut self, scheme: SchemeRegistry) -> Self {
        self.scheme = scheme;
        self
    }

    /// Expose a marker's sentinel as `markers.<name>`.
    pub fn with_marker(mut self, marker: &Marker) -> Self {
        self.markers
            .insert(marker.name().to_string(), marker.sentinel());
        self
    }

    /// Add a free-form variable, exposed as `vars.<key>`.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn boilerplate(&self) -> Option<&str> {
        self.boilerplate.as_deref()
    }

    pub fn resource(&self) -> Option<&ResourceView> {
        self.resource.as_ref()
    }

    pub fn project(&self) -> Option<&ProjectContext> {
        self.project.as_ref()
    }

    pub fn marker(&self, name: &str) -> Option<&str> {
        self.markers.get(name).map(String::as_str)
    }

    pub fn scheme(&self) -> &SchemeRegistry {
        &self.scheme
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}
