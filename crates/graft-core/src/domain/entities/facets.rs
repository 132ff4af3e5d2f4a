//! Shared configuration facets.
//!
//! Builders do not embed common fields; they declare which facets they need
//! and the orchestrator checks the declaration against what the caller
//! supplied before the builder runs.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{
    entities::{
        project::ProjectContext, resource::ResourceDescriptor, scheme::SchemeRegistry,
        template::RenderContext,
    },
    error::DomainError,
};

/// One piece of shared configuration a builder may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Boilerplate,
    Resource,
    Project,
}

impl Facet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boilerplate => "boilerplate",
            Self::Resource => "resource descriptor",
            Self::Project => "project context",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The facets supplied for one scaffold run.
#[derive(Debug, Clone, Default)]
pub struct Facets {
    boilerplate: Option<String>,
    resource: Option<ResourceDescriptor>,
    project: Option<ProjectContext>,
    scheme: SchemeRegistry,
    vars: BTreeMap<String, String>,
}

impl Facets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boilerplate(mut self, boilerplate: impl Into<String>) -> Self {
        self.boilerplate = Some(boilerplate.into());
        self
    }

    pub fn with_resource(mut self, resource: ResourceDescriptor) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn with_project(mut self, project: ProjectContext) -> Self {
        self.project = Some(project);
        self
    }

    pub fn with_scheme(mut self, scheme: SchemeRegistry) -> Self {
        self.scheme = scheme;
        self
    }

    /// Caller variable exposed to templates as `vars.<key>`.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn boilerplate(&self) -> Option<&str> {
        self.boilerplate.as_deref()
    }

    pub fn resource(&self) -> Option<&ResourceDescriptor> {
        self.resource.as_ref()
    }

    pub fn project(&self) -> Option<&ProjectContext> {
        self.project.as_ref()
    }

    pub fn scheme(&self) -> &SchemeRegistry {
        &self.scheme
    }

    pub fn has(&self, facet: Facet) -> bool {
        match facet {
            Facet::Boilerplate => self.boilerplate.is_some(),
            Facet::Resource => self.resource.is_some(),
            Facet::Project => self.project.is_some(),
        }
    }

    /// Fail with the first required facet that is missing.
    pub fn require(&self, builder: &str, required: &[Facet]) -> Result<(), DomainError> {
        match required.iter().find(|f| !self.has(**f)) {
            Some(missing) => Err(DomainError::MissingFacet {
                builder: builder.to_string(),
                facet: missing.as_str(),
            }),
            None => Ok(()),
        }
    }

    /// The project context, or a `MissingFacet` error naming `builder`.
    pub fn require_project(&self, builder: &str) -> Result<&ProjectContext, DomainError> {
        self.project.as_ref().ok_or_else(|| DomainError::MissingFacet {
            builder: builder.to_string(),
            facet: Facet::Project.as_str(),
        })
    }

    /// The resource descriptor, or a `MissingFacet` error naming `builder`.
    pub fn require_resource(&self, builder: &str) -> Result<&ResourceDescriptor, DomainError> {
        self.resource.as_ref().ok_or_else(|| DomainError::MissingFacet {
            builder: builder.to_string(),
            facet: Facet::Resource.as_str(),
        })
    }

    /// Base render context carrying every supplied facet.
    pub fn render_context(&self) -> RenderContext {
        let mut ctx = RenderContext::new().with_scheme(self.scheme.clone());
        if let Some(boilerplate) = &self.boilerplate {
            ctx = ctx.with_boilerplate(boilerplate.clone());
        }
        if let Some(resource) = &self.resource {
            ctx = ctx.with_resource(resource, self.project.as_ref());
        }
        if let Some(project) = &self.project {
            ctx = ctx.with_project(project.clone());
        }
        for (key, value) in &self.vars {
            ctx = ctx.with_variable(key.clone(), value.clone());
        }
        ctx
    }
}
