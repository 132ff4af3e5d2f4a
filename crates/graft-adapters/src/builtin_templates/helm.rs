//! Helm chart files. Bodies are literal: their `{{ }}` belongs to Helm.

use graft_core::{
    application::ports::TemplateBuilder,
    domain::{ExistencePolicy, Facet, Facets, TemplateSpec},
    error::GraftResult,
};

pub const HELM_IGNORE_PATH: &str = "config/charts/%[project-name]/.helmignore";
pub const HELPERS_PATH: &str = "config/charts/%[project-name]/templates/_helpers.tpl";
pub const CERT_MANAGER_CHECK_PATH: &str =
    "config/charts/%[project-name]/templates/webhook/cert-manager-check.yaml";
pub const WEBHOOK_SERVICE_PATH: &str =
    "config/charts/%[project-name]/templates/webhook/service.yaml";
pub const WEBHOOK_CERTIFICATE_PATH: &str =
    "config/charts/%[project-name]/templates/webhook/certificate.yaml";

fn skip_unless_forced(spec: TemplateSpec, force: bool) -> TemplateSpec {
    spec.with_policy(ExistencePolicy::Skip).with_force(force)
}

/// `.helmignore` for the project chart. Several scaffolders emit it, so an
/// existing copy is kept.
#[derive(Debug, Clone, Default)]
pub struct HelmIgnore {
    force: bool,
}

impl HelmIgnore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

impl TemplateBuilder for HelmIgnore {
    fn name(&self) -> &str {
        "helm-ignore"
    }

    fn required_facets(&self) -> &[Facet] {
        &[Facet::Project]
    }

    fn template(&self, _facets: &Facets) -> GraftResult<TemplateSpec> {
        Ok(skip_unless_forced(
            TemplateSpec::literal(HELM_IGNORE_PATH, HELM_IGNORE),
            self.force,
        ))
    }
}

/// Named templates shared by every chart manifest. Always regenerated.
#[derive(Debug, Clone, Default)]
pub struct ChartHelpers {
    webhook: bool,
}

impl ChartHelpers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Include the webhook certificate helpers.
    pub fn with_webhook(mut self, enabled: bool) -> Self {
        self.webhook = enabled;
        self
    }
}

impl TemplateBuilder for ChartHelpers {
    fn name(&self) -> &str {
        "chart-helpers"
    }

    fn required_facets(&self) -> &[Facet] {
        &[Facet::Project]
    }

    fn template(&self, _facets: &Facets) -> GraftResult<TemplateSpec> {
        let body = if self.webhook {
            format!("{HELPERS}\n{WEBHOOK_HELPERS}")
        } else {
            HELPERS.to_string()
        };
        Ok(TemplateSpec::literal(HELPERS_PATH, body).with_policy(ExistencePolicy::Overwrite))
    }
}

/// Fails the install when cert-manager is missing but webhooks are enabled.
#[derive(Debug, Clone, Default)]
pub struct WebhookCertManagerCheck {
    force: bool,
}

impl WebhookCertManagerCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

impl TemplateBuilder for WebhookCertManagerCheck {
    fn name(&self) -> &str {
        "webhook-cert-manager-check"
    }

    fn required_facets(&self) -> &[Facet] {
        &[Facet::Project]
    }

    fn template(&self, _facets: &Facets) -> GraftResult<TemplateSpec> {
        Ok(skip_unless_forced(
            TemplateSpec::literal(CERT_MANAGER_CHECK_PATH, CERT_MANAGER_CHECK),
            self.force,
        ))
    }
}

/// Self-signed issuer and serving certificate for the webhook server.
#[derive(Debug, Clone, Default)]
pub struct WebhookCertificate {
    force: bool,
}

impl WebhookCertificate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

impl TemplateBuilder for WebhookCertificate {
    fn name(&self) -> &str {
        "webhook-certificate"
    }

    fn required_facets(&self) -> &[Facet] {
        &[Facet::Project]
    }

    fn template(&self, _facets: &Facets) -> GraftResult<TemplateSpec> {
        Ok(skip_unless_forced(
            TemplateSpec::literal(WEBHOOK_CERTIFICATE_PATH, WEBHOOK_CERTIFICATE),
            self.force,
        ))
    }
}

/// Service fronting the manager's webhook server.
#[derive(Debug, Clone, Default)]
pub struct WebhookService {
    force: bool,
}

impl WebhookService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

impl TemplateBuilder for WebhookService {
    fn name(&self) -> &str {
        "webhook-service"
    }

    fn required_facets(&self) -> &[Facet] {
        &[Facet::Project]
    }

    fn template(&self, _facets: &Facets) -> GraftResult<TemplateSpec> {
        Ok(skip_unless_forced(
            TemplateSpec::literal(WEBHOOK_SERVICE_PATH, WEBHOOK_SERVICE),
            self.force,
        ))
    }
}

pub(crate) const HELM_IGNORE: &str = "# Patterns to ignore when building packages.
# This supports shell glob matching, relative path matching, and
# negation (prefixed with !). Only one pattern per line.
.DS_Store
# Common VCS dirs
.git/
.gitignore
.bzr/
.bzrignore
.hg/
.hgignore
.svn/
# Common backup files
*.swp
*.bak
*.tmp
*.orig
*~
# Various IDEs
.project
.idea/
*.tmproj
.vscode/

";

pub(crate) const HELPERS: &str = r#"{{/*
Expand the name of the chart.
*/}}
{{- define "chart.name" -}}
{{- default .Chart.Name .Values.nameOverride | trunc 63 | trimSuffix "-" }}
{{- end }}

{{/*
Create a default fully qualified app name, truncated to 63 characters.
*/}}
{{- define "chart.fullname" -}}
{{- if .Values.fullnameOverride }}
{{- .Values.fullnameOverride | trunc 63 | trimSuffix "-" }}
{{- else }}
{{- $name := default .Chart.Name .Values.nameOverride }}
{{- if contains $name .Release.Name }}
{{- .Release.Name | trunc 63 | trimSuffix "-" }}
{{- else }}
{{- printf "%s-%s" .Release.Name $name | trunc 63 | trimSuffix "-" }}
{{- end }}
{{- end }}
{{- end }}

{{/*
Chart name and version as used by the chart label.
*/}}
{{- define "chart.chart" -}}
{{- printf "%s-%s" .Chart.Name .Chart.Version | replace "+" "_" | trunc 63 | trimSuffix "-" }}
{{- end }}

{{/*
Common labels
*/}}
{{- define "chart.labels" -}}
helm.sh/chart: {{ include "chart.chart" . }}
{{ include "chart.selectorLabels" . }}
{{- if .Chart.AppVersion }}
app.kubernetes.io/version: {{ .Chart.AppVersion | quote }}
{{- end }}
app.kubernetes.io/managed-by: {{ .Release.Service }}
{{- end }}

{{/*
Selector labels
*/}}
{{- define "chart.selectorLabels" -}}
app.kubernetes.io/name: {{ include "chart.name" . }}
app.kubernetes.io/instance: {{ .Release.Name }}
{{- end }}
"#;

pub(crate) const WEBHOOK_HELPERS: &str = r#"{{/*
Name of the webhook serving certificate secret.
*/}}
{{- define "chart.webhookCertSecret" -}}
{{- printf "%s-webhook-server-cert" (include "chart.fullname" .) | trunc 63 | trimSuffix "-" }}
{{- end }}

{{/*
DNS name of the webhook service inside the cluster.
*/}}
{{- define "chart.webhookServiceDNS" -}}
{{- printf "%s-webhook-service.%s.svc" (include "chart.fullname" .) .Release.Namespace }}
{{- end }}
"#;

pub(crate) const CERT_MANAGER_CHECK: &str = r#"{{- if .Values.webhook.enabled }}
{{- if not (.Capabilities.APIVersions.Has "cert-manager.io/v1") }}
{{- fail "webhook.enabled requires cert-manager (cert-manager.io/v1) to be installed" }}
{{- end }}
{{- end }}
"#;

pub(crate) const WEBHOOK_CERTIFICATE: &str = r#"{{- if .Values.webhook.enabled }}
apiVersion: cert-manager.io/v1
kind: Issuer
metadata:
  name: {{ include "chart.fullname" . }}-selfsigned-issuer
  namespace: {{ .Release.Namespace }}
  labels:
    {{- include "chart.labels" . | nindent 4 }}
spec:
  selfSigned: {}
---
apiVersion: cert-manager.io/v1
kind: Certificate
metadata:
  name: {{ include "chart.fullname" . }}-serving-cert
  namespace: {{ .Release.Namespace }}
  labels:
    {{- include "chart.labels" . | nindent 4 }}
spec:
  dnsNames:
    - {{ include "chart.webhookServiceDNS" . }}
    - {{ include "chart.webhookServiceDNS" . }}.cluster.local
  issuerRef:
    kind: Issuer
    name: {{ include "chart.fullname" . }}-selfsigned-issuer
  secretName: {{ include "chart.webhookCertSecret" . }}
{{- end }}
"#;

pub(crate) const WEBHOOK_SERVICE: &str = r#"{{- if .Values.webhook.enabled }}
apiVersion: v1
kind: Service
metadata:
  name: {{ include "chart.fullname" . }}-webhook-service
  namespace: {{ .Release.Namespace }}
  labels:
    {{- include "chart.labels" . | nindent 4 }}
spec:
  ports:
    - port: 443
      protocol: TCP
      targetPort: 9443
  selector:
    {{- include "chart.selectorLabels" . | nindent 4 }}
{{- end }}
"#;
