//! The controller manager entrypoint and the inserter that wires resources,
//! controllers and webhooks into it.

use graft_core::{
    application::ports::{InserterBuilder, TemplateBuilder},
    domain::{
        ExistencePolicy, Facet, Facets, Fragment, InserterSpec, ProjectContext,
        ResourceDescriptor, TemplateSpec,
    },
    error::GraftResult,
};

pub const MAIN_PATH: &str = "cmd/main.go";
pub const LEGACY_MAIN_PATH: &str = "main.go";

pub const IMPORTS_MARKER: &str = "imports";
pub const SCHEME_MARKER: &str = "scheme";
pub const BUILDER_MARKER: &str = "builder";

/// Entrypoint location for the project's layout.
pub fn main_path(project: &ProjectContext) -> &'static str {
    if project.is_legacy_layout() {
        LEGACY_MAIN_PATH
    } else {
        MAIN_PATH
    }
}

/// Scaffolds the manager entrypoint with its three markers.
#[derive(Debug, Clone, Default)]
pub struct MainTemplate {
    force: bool,
}

impl MainTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

impl TemplateBuilder for MainTemplate {
    fn name(&self) -> &str {
        "main"
    }

    fn required_facets(&self) -> &[Facet] {
        &[Facet::Boilerplate, Facet::Project]
    }

    fn template(&self, facets: &Facets) -> GraftResult<TemplateSpec> {
        let project = facets.require_project(self.name())?;
        Ok(TemplateSpec::parameterized(main_path(project), MAIN_TEMPLATE)
            .with_marker(IMPORTS_MARKER)
            .with_marker(SCHEME_MARKER)
            .with_marker(BUILDER_MARKER)
            .with_policy(ExistencePolicy::Skip)
            .with_force(self.force))
    }
}

/// Which package hosts the resource's reconciler.
///
/// | layout | grouping | import | qualifier |
/// |--------|----------|--------|-----------|
/// | nested | single | `"<repo>/internal/controller"` | `controller` |
/// | nested | multi | `<pkg>controller "<repo>/internal/controller/<group>"` | `<pkg>controller` |
/// | legacy | single | `"<repo>/controllers"` | `controllers` |
/// | legacy | multi | `<pkg>controller "<repo>/controllers/<group>"` | `<pkg>controller` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerWiring {
    NestedSingle,
    NestedMulti,
    LegacySingle,
    LegacyMulti,
}

impl ControllerWiring {
    /// Core resources (no group) always use the single-group variant.
    pub fn select(project: &ProjectContext, resource: &ResourceDescriptor) -> Self {
        let multi = project.is_multi_group() && resource.has_group();
        match (project.is_legacy_layout(), multi) {
            (false, false) => Self::NestedSingle,
            (false, true) => Self::NestedMulti,
            (true, false) => Self::LegacySingle,
            (true, true) => Self::LegacyMulti,
        }
    }

    fn base(&self) -> &'static str {
        match self {
            Self::NestedSingle | Self::NestedMulti => "internal/controller",
            Self::LegacySingle | Self::LegacyMulti => "controllers",
        }
    }

    pub fn import_line(&self, project: &ProjectContext, resource: &ResourceDescriptor) -> String {
        match self {
            Self::NestedSingle | Self::LegacySingle => {
                format!("\"{}/{}\"", project.repo(), self.base())
            }
            Self::NestedMulti | Self::LegacyMulti => format!(
                "{}controller \"{}/{}/{}\"",
                resource.package_name(),
                project.repo(),
                self.base(),
                resource.group()
            ),
        }
    }

    pub fn qualifier(&self, resource: &ResourceDescriptor) -> String {
        match self {
            Self::NestedSingle => "controller".to_string(),
            Self::LegacySingle => "controllers".to_string(),
            Self::NestedMulti | Self::LegacyMulti => {
                format!("{}controller", resource.package_name())
            }
        }
    }

    pub fn reconciler_setup(&self, resource: &ResourceDescriptor) -> String {
        let kind = resource.kind();
        format!(
            "if err = (&{qualifier}.{kind}Reconciler{{
\tMaxConcurrentReconciles: concurrent,
\tRateLimiter:             utilcontroller.GetRateLimiter(rateLimiterOptions),
}}).SetupWithManager(mgr); err != nil {{
\tsetupLog.Error(err, \"unable to create controller\", \"controller\", \"{kind}\")
\tos.Exit(1)
}}",
            qualifier = self.qualifier(resource),
        )
    }
}

/// Webhook setup, qualified by the resource's API package alias.
pub fn webhook_setup(resource: &ResourceDescriptor) -> String {
    let kind = resource.kind();
    format!(
        "if os.Getenv(\"DISABLE_WEBHOOKS\") != \"true\" {{
\tif err = (&{alias}.{kind}{{}}).SetupWebhookWithManager(mgr); err != nil {{
\t\tsetupLog.Error(err, \"unable to create webhook\", \"webhook\", \"{kind}\")
\t\tos.Exit(1)
\t}}
}} else {{
\tsetupLog.Info(\"webhooks disabled\", \"webhook\", \"{kind}\")
}}",
        alias = resource.import_alias(),
    )
}

/// Wires one resource into the entrypoint.
///
/// Each flag switches one concern on; fragments for disabled concerns are
/// still declared but never emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct MainUpdater {
    pub wire_resource: bool,
    pub wire_controller: bool,
    pub wire_webhook: bool,
}

impl MainUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wire_resource(mut self, on: bool) -> Self {
        self.wire_resource = on;
        self
    }

    pub fn wire_controller(mut self, on: bool) -> Self {
        self.wire_controller = on;
        self
    }

    pub fn wire_webhook(mut self, on: bool) -> Self {
        self.wire_webhook = on;
        self
    }
}

impl InserterBuilder for MainUpdater {
    fn name(&self) -> &str {
        "main-updater"
    }

    fn required_facets(&self) -> &[Facet] {
        &[Facet::Project, Facet::Resource]
    }

    fn inserter(&self, facets: &Facets) -> GraftResult<InserterSpec> {
        let project = facets.require_project(self.name())?;
        let resource = facets.require_resource(self.name())?;
        let wiring = ControllerWiring::select(project, resource);
        let alias = resource.import_alias();

        Ok(InserterSpec::new(main_path(project))
            .with_marker(IMPORTS_MARKER)
            .with_marker(SCHEME_MARKER)
            .with_marker(BUILDER_MARKER)
            .with_fragment(
                Fragment::new(
                    IMPORTS_MARKER,
                    &format!("{alias} \"{}\"", resource.api_import_path(project)),
                )
                .when(self.wire_resource),
            )
            .with_fragment(
                Fragment::new(IMPORTS_MARKER, &wiring.import_line(project, resource))
                    .when(self.wire_controller),
            )
            .with_fragment(
                Fragment::new(
                    SCHEME_MARKER,
                    &format!("utilruntime.Must({alias}.AddToScheme(scheme))"),
                )
                .when(self.wire_resource),
            )
            .with_fragment(
                Fragment::new(BUILDER_MARKER, &wiring.reconciler_setup(resource))
                    .when(self.wire_controller),
            )
            .with_fragment(
                Fragment::new(BUILDER_MARKER, &webhook_setup(resource)).when(self.wire_webhook),
            ))
    }
}

const MAIN_TEMPLATE: &str = r#"{{boilerplate}}

package main

import (
	"flag"
	"os"

	// Import all Kubernetes client auth plugins (e.g. Azure, GCP, OIDC, etc.)
	// to ensure that exec-entrypoint and run can make use of them.
	_ "k8s.io/client-go/plugin/pkg/client/auth"

	"k8s.io/apimachinery/pkg/runtime"
	utilruntime "k8s.io/apimachinery/pkg/util/runtime"
	clientgoscheme "k8s.io/client-go/kubernetes/scheme"
	ctrl "sigs.k8s.io/controller-runtime"
	"sigs.k8s.io/controller-runtime/pkg/healthz"
	"sigs.k8s.io/controller-runtime/pkg/log/zap"

	utilcontroller "github.com/labring/operator-sdk/controller"
{{#each scheme}}	{{alias}} "{{path}}"
{{/each}}	{{markers.imports}}
)

var (
	scheme   = runtime.NewScheme()
	setupLog = ctrl.Log.WithName("setup")
)

func init() {
	utilruntime.Must(clientgoscheme.AddToScheme(scheme))
{{#each scheme}}	utilruntime.Must({{alias}}.AddToScheme(scheme))
{{/each}}
	{{markers.scheme}}
}

func main() {
	var (
		metricsAddr          string
		enableLeaderElection bool
		probeAddr            string
		concurrent           int
		rateLimiterOptions   utilcontroller.RateLimiterOptions
	)
	flag.StringVar(&metricsAddr, "metrics-bind-address", ":8080", "The address the metric endpoint binds to.")
	flag.StringVar(&probeAddr, "health-probe-bind-address", ":8081", "The address the probe endpoint binds to.")
	flag.BoolVar(&enableLeaderElection, "leader-elect", false,
		"Enable leader election for controller manager. "+
			"Enabling this will ensure there is only one active controller manager.")
	flag.IntVar(&concurrent, "concurrent", 5, "The number of concurrent reconciles.")
	rateLimiterOptions.BindFlags(flag.CommandLine)
	opts := zap.Options{
		Development: true,
	}
	opts.BindFlags(flag.CommandLine)
	flag.Parse()

	ctrl.SetLogger(zap.New(zap.UseFlagOptions(&opts)))

	mgr, err := ctrl.NewManager(ctrl.GetConfigOrDie(), ctrl.Options{
		Scheme:                 scheme,
		MetricsBindAddress:     metricsAddr,
		Port:                   9443,
		HealthProbeBindAddress: probeAddr,
		LeaderElection:         enableLeaderElection,
		LeaderElectionID:       "{{hash_fnv project.repo}}.{{project.domain}}",
	})
	if err != nil {
		setupLog.Error(err, "unable to start manager")
		os.Exit(1)
	}

	{{markers.builder}}

	if err := mgr.AddHealthzCheck("healthz", healthz.Ping); err != nil {
		setupLog.Error(err, "unable to set up health check")
		os.Exit(1)
	}
	if err := mgr.AddReadyzCheck("readyz", healthz.Ping); err != nil {
		setupLog.Error(err, "unable to set up ready check")
		os.Exit(1)
	}

	setupLog.Info("starting manager")
	if err := mgr.Start(ctrl.SetupSignalHandler()); err != nil {
		setupLog.Error(err, "problem running manager")
		os.Exit(1)
	}
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::domain::Layout;

    fn resource(group: &str) -> ResourceDescriptor {
        ResourceDescriptor::builder()
            .group(group)
            .version("v1")
            .kind("CronJob")
            .domain("tutorial.io")
            .build()
            .unwrap()
    }

    fn project(layout: Layout, multi: bool) -> ProjectContext {
        ProjectContext::new("tutorial.io/project", "tutorial.io")
            .with_layout(layout)
            .with_multi_group(multi)
    }

    #[test]
    fn selects_all_four_variants() {
        let batch = resource("batch");
        let cases = [
            (Layout::Nested, false, ControllerWiring::NestedSingle, "\"tutorial.io/project/internal/controller\"", "controller"),
            (Layout::Nested, true, ControllerWiring::NestedMulti, "batchcontroller \"tutorial.io/project/internal/controller/batch\"", "batchcontroller"),
            (Layout::Legacy, false, ControllerWiring::LegacySingle, "\"tutorial.io/project/controllers\"", "controllers"),
            (Layout::Legacy, true, ControllerWiring::LegacyMulti, "batchcontroller \"tutorial.io/project/controllers/batch\"", "batchcontroller"),
        ];
        for (layout, multi, variant, import, qualifier) in cases {
            let project = project(layout, multi);
            let wiring = ControllerWiring::select(&project, &batch);
            assert_eq!(wiring, variant);
            assert_eq!(wiring.import_line(&project, &batch), import);
            assert_eq!(wiring.qualifier(&batch), qualifier);
        }
    }

    #[test]
    fn core_resource_in_multi_group_uses_single_variant() {
        let core = resource("");
        let project = project(Layout::Nested, true);
        assert_eq!(
            ControllerWiring::select(&project, &core),
            ControllerWiring::NestedSingle
        );
    }

    #[test]
    fn legacy_layout_moves_main() {
        assert_eq!(main_path(&project(Layout::Legacy, false)), "main.go");
        assert_eq!(main_path(&project(Layout::Nested, false)), "cmd/main.go");
    }

    #[test]
    fn updater_gates_fragments_by_flag() {
        let facets = Facets::new()
            .with_project(project(Layout::Nested, false))
            .with_resource(resource("batch"));
        let spec = MainUpdater::new()
            .wire_controller(true)
            .inserter(&facets)
            .unwrap();

        assert_eq!(spec.path_pattern(), "cmd/main.go");
        assert_eq!(spec.fragments_for(IMPORTS_MARKER).count(), 1);
        assert_eq!(spec.fragments_for(SCHEME_MARKER).count(), 0);
        let builder: Vec<_> = spec.fragments_for(BUILDER_MARKER).collect();
        assert_eq!(builder.len(), 1);
        assert!(builder[0].lines()[0].starts_with("if err = (&controller.CronJobReconciler{"));
    }

    #[test]
    fn webhook_is_qualified_by_import_alias() {
        let text = webhook_setup(&resource("batch"));
        assert!(text.contains("(&batchv1.CronJob{}).SetupWebhookWithManager(mgr)"));
    }
}
