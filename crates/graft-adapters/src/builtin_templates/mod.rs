//! Built-in builders.
//!
//! | Builder | Kind | Path | Policy |
//! |---------|------|------|--------|
//! | [`MainTemplate`] | template | `cmd/main.go` (`main.go` legacy) | skip |
//! | [`MainUpdater`] | inserter | same as above | markers |
//! | [`TypesTemplate`] | template | `api/%[group]/%[version]/%[kind]_types.go` | error |
//! | [`HelmIgnore`] | template | `config/charts/%[project-name]/.helmignore` | skip |
//! | [`ChartHelpers`] | template | `config/charts/%[project-name]/templates/_helpers.tpl` | overwrite |
//! | [`WebhookCertManagerCheck`] | template | `.../templates/webhook/cert-manager-check.yaml` | skip |
//! | [`WebhookService`] | template | `.../templates/webhook/service.yaml` | skip |
//! | [`WebhookCertificate`] | template | `.../templates/webhook/certificate.yaml` | skip |
//!
//! `--force` turns every template policy into overwrite for that builder.

mod api_types;
mod helm;
mod main_go;

pub use api_types::{TYPES_PATH, TypesTemplate};
pub use helm::{
    CERT_MANAGER_CHECK_PATH, ChartHelpers, HELM_IGNORE_PATH, HELPERS_PATH, HelmIgnore,
    WEBHOOK_CERTIFICATE_PATH, WEBHOOK_SERVICE_PATH, WebhookCertManagerCheck, WebhookCertificate,
    WebhookService,
};
pub use main_go::{
    BUILDER_MARKER, ControllerWiring, IMPORTS_MARKER, LEGACY_MAIN_PATH, MAIN_PATH, MainTemplate,
    MainUpdater, SCHEME_MARKER, main_path, webhook_setup,
};
