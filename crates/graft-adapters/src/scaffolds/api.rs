use graft_core::application::Builder;

use super::Scaffolder;
use crate::builtin_templates::{MainUpdater, TypesTemplate};

/// Adds an API: its types file plus entrypoint wiring.
#[derive(Debug, Clone, Copy)]
pub struct ApiScaffolder {
    /// Scaffold the types file and register the API package.
    pub resource: bool,
    /// Wire the reconciler into the manager.
    pub controller: bool,
    pub force: bool,
}

impl Default for ApiScaffolder {
    fn default() -> Self {
        Self {
            resource: true,
            controller: true,
            force: false,
        }
    }
}

impl Scaffolder for ApiScaffolder {
    fn name(&self) -> &'static str {
        "api"
    }

    fn builders(&self) -> Vec<Builder> {
        let mut builders = Vec::with_capacity(2);
        if self.resource {
            builders.push(Builder::template(
                TypesTemplate::new().with_force(self.force),
            ));
        }
        builders.push(Builder::inserter(
            MainUpdater::new()
                .wire_resource(self.resource)
                .wire_controller(self.controller),
        ));
        builders
    }
}
