use serde::Serialize;

use crate::domain::entities::{project::ProjectContext, resource::ResourceDescriptor};

/// One API package registered with the runtime scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemeEntry {
    pub alias: String,
    pub path: String,
}

/// Explicit registry of API packages the generated entrypoint adds to its
/// scheme.
///
/// Built by the caller and handed to the render context; nothing registers
/// itself implicitly. Registration order is preserved and re-registering an
/// alias is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SchemeRegistry {
    entries: Vec<SchemeEntry>,
}

impl SchemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package by alias and import path.
    pub fn register(&mut self, alias: impl Into<String>, path: impl Into<String>) -> bool {
        let alias = alias.into();
        if self.entries.iter().any(|e| e.alias == alias) {
            return false;
        }
        self.entries.push(SchemeEntry {
            alias,
            path: path.into(),
        });
        true
    }

    /// Register the API package of `resource` within `project`.
    pub fn register_resource(
        &mut self,
        resource: &ResourceDescriptor,
        project: &ProjectContext,
    ) -> bool {
        self.register(resource.import_alias(), resource.api_import_path(project))
    }

    pub fn with(mut self, alias: impl Into<String>, path: impl Into<String>) -> Self {
        self.register(alias, path);
        self
    }

    pub fn entries(&self) -> &[SchemeEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
