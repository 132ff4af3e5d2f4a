use graft_core::application::Builder;

use super::Scaffolder;
use crate::builtin_templates::{HelmIgnore, MainTemplate};

/// Creates the project entrypoint and chart ignore file.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitScaffolder {
    pub force: bool,
}

impl InitScaffolder {
    pub fn new(force: bool) -> Self {
        Self { force }
    }
}

impl Scaffolder for InitScaffolder {
    fn name(&self) -> &'static str {
        "init"
    }

    fn builders(&self) -> Vec<Builder> {
        vec![
            Builder::template(MainTemplate::new().with_force(self.force)),
            Builder::template(HelmIgnore::new().with_force(self.force)),
        ]
    }
}
