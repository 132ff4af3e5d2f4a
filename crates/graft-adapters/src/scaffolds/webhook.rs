use graft_core::application::Builder;

use super::Scaffolder;
use crate::builtin_templates::{
    ChartHelpers, HelmIgnore, MainUpdater, WebhookCertManagerCheck, WebhookCertificate,
    WebhookService,
};

/// Adds webhook chart manifests and wires the webhook into the manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebhookScaffolder {
    pub force: bool,
}

impl WebhookScaffolder {
    pub fn new(force: bool) -> Self {
        Self { force }
    }
}

impl Scaffolder for WebhookScaffolder {
    fn name(&self) -> &'static str {
        "webhook"
    }

    fn builders(&self) -> Vec<Builder> {
        vec![
            Builder::template(HelmIgnore::new().with_force(self.force)),
            Builder::template(ChartHelpers::new().with_webhook(true)),
            Builder::template(WebhookCertManagerCheck::new().with_force(self.force)),
            Builder::template(WebhookService::new().with_force(self.force)),
            Builder::template(WebhookCertificate::new().with_force(self.force)),
            Builder::inserter(MainUpdater::new().wire_webhook(true)),
        ]
    }
}
