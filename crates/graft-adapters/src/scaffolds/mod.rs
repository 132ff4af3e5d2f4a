//! Scaffolders: named, ordered builder lists for one user-facing operation.
//!
//! A scaffolder decides which builders run and with which flags; the
//! orchestrator does the work.

mod api;
mod init;
mod webhook;

pub use api::ApiScaffolder;
pub use init::InitScaffolder;
pub use webhook::WebhookScaffolder;

use graft_core::{
    application::{Builder, ScaffoldReport, ScaffoldService},
    domain::Facets,
    error::GraftResult,
};
use tracing::info;

pub trait Scaffolder {
    fn name(&self) -> &'static str;

    fn builders(&self) -> Vec<Builder>;

    fn scaffold(&self, service: &ScaffoldService, facets: &Facets) -> GraftResult<ScaffoldReport> {
        let builders = self.builders();
        info!(scaffolder = self.name(), builders = builders.len(), "Running scaffolder");
        service.execute(facets, &builders)
    }
}
