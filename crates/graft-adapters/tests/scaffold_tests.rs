//! End-to-end scaffolding runs: built-in builders, the handlebars renderer
//! and both filesystem adapters.

use graft_adapters::{
    ApiScaffolder, HandlebarsRenderer, InitScaffolder, LocalFilesystem, MemoryFilesystem,
    Scaffolder, WebhookScaffolder,
};
use graft_core::application::{FileAction, ScaffoldService};
use graft_core::domain::{
    DomainError, Facets, Layout, ProjectContext, ResourceDescriptor, SchemeRegistry,
};
use graft_core::error::GraftError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const BOILERPLATE: &str = "// Copyright 2026 The Tutorial Authors.";

fn project() -> ProjectContext {
    ProjectContext::new("tutorial.io/project", "tutorial.io")
}

fn resource(kind: &str) -> ResourceDescriptor {
    ResourceDescriptor::builder()
        .group("batch")
        .version("v1")
        .kind(kind)
        .domain("tutorial.io")
        .build()
        .unwrap()
}

fn facets(project: ProjectContext, resource: ResourceDescriptor) -> Facets {
    Facets::new()
        .with_boilerplate(BOILERPLATE)
        .with_project(project)
        .with_resource(resource)
}

fn service(fs: &MemoryFilesystem) -> ScaffoldService {
    ScaffoldService::new(Box::new(fs.clone()), Box::new(HandlebarsRenderer::new()))
}

/// A filesystem holding a freshly initialised project.
fn initialised(project: ProjectContext) -> MemoryFilesystem {
    let fs = MemoryFilesystem::new();
    let facets = Facets::new()
        .with_boilerplate(BOILERPLATE)
        .with_project(project);
    InitScaffolder::default()
        .scaffold(&service(&fs), &facets)
        .unwrap();
    fs
}

fn main_go(fs: &MemoryFilesystem) -> String {
    fs.contents("cmd/main.go").unwrap()
}

#[test]
fn init_plants_all_three_markers() {
    let fs = initialised(project());
    let main = main_go(&fs);

    assert!(main.starts_with(BOILERPLATE));
    for name in ["imports", "scheme", "builder"] {
        let sentinel = format!("// +graft:scaffold:cmd/main.go:{name}");
        assert_eq!(main.matches(&sentinel).count(), 1, "{sentinel}");
    }
    assert!(fs.contents("config/charts/project/.helmignore").is_some());
}

#[test]
fn init_renders_explicit_scheme_entries() {
    let fs = MemoryFilesystem::new();
    let scheme = SchemeRegistry::new().with("batchv1", "tutorial.io/project/api/v1");
    let facets = Facets::new()
        .with_boilerplate(BOILERPLATE)
        .with_project(project())
        .with_scheme(scheme);

    InitScaffolder::default()
        .scaffold(&service(&fs), &facets)
        .unwrap();

    let main = main_go(&fs);
    assert!(main.contains("\tbatchv1 \"tutorial.io/project/api/v1\"\n"));
    assert!(main.contains("\tutilruntime.Must(batchv1.AddToScheme(scheme))\n"));
}

#[test]
fn init_skips_existing_files() {
    let fs = initialised(project());
    let facets = Facets::new()
        .with_boilerplate("// other")
        .with_project(project());

    let report = InitScaffolder::default()
        .scaffold(&service(&fs), &facets)
        .unwrap();

    assert_eq!(report.written(), 0);
    assert_eq!(
        report.outcome_for("cmd/main.go").unwrap().action,
        FileAction::Skipped
    );
    assert!(main_go(&fs).starts_with(BOILERPLATE));
}

#[test]
fn api_wires_resource_and_controller() {
    let fs = initialised(project());

    let report = ApiScaffolder::default()
        .scaffold(&service(&fs), &facets(project(), resource("CronJob")))
        .unwrap();

    assert_eq!(
        report.outcome_for("api/v1/cronjob_types.go").unwrap().action,
        FileAction::Created
    );
    assert_eq!(
        report.outcome_for("cmd/main.go").unwrap().action,
        FileAction::Updated
    );

    let main = main_go(&fs);
    assert!(main.contains(
        "\tbatchv1 \"tutorial.io/project/api/v1\"\n\
         \t\"tutorial.io/project/internal/controller\"\n\
         \t// +graft:scaffold:cmd/main.go:imports\n"
    ));
    assert!(main.contains(
        "\tutilruntime.Must(batchv1.AddToScheme(scheme))\n\
         \t// +graft:scaffold:cmd/main.go:scheme\n"
    ));
    assert!(main.contains("\tif err = (&controller.CronJobReconciler{\n\t\tMaxConcurrentReconciles: concurrent,\n"));
    assert!(!main.contains("SetupWebhookWithManager"));
}

#[test]
fn api_rerun_is_byte_identical() {
    let fs = initialised(project());
    let facets = facets(project(), resource("CronJob"));
    let api = ApiScaffolder {
        force: true,
        ..ApiScaffolder::default()
    };

    api.scaffold(&service(&fs), &facets).unwrap();
    let first = main_go(&fs);
    let report = api.scaffold(&service(&fs), &facets).unwrap();

    assert_eq!(main_go(&fs), first);
    assert_eq!(
        report.outcome_for("cmd/main.go").unwrap().action,
        FileAction::Unchanged
    );
}

#[test]
fn second_resource_is_appended_after_the_first() {
    let fs = initialised(project());
    let svc = service(&fs);
    ApiScaffolder::default()
        .scaffold(&svc, &facets(project(), resource("CronJob")))
        .unwrap();
    ApiScaffolder {
        resource: false,
        ..ApiScaffolder::default()
    }
    .scaffold(&svc, &facets(project(), resource("Job")))
    .unwrap();

    let main = main_go(&fs);
    let cronjob = main.find("CronJobReconciler").unwrap();
    let job = main.find("&controller.JobReconciler").unwrap();
    let marker = main.find("// +graft:scaffold:cmd/main.go:builder").unwrap();
    assert!(cronjob < job && job < marker);
    // both controllers share one package import
    assert_eq!(
        main.matches("\"tutorial.io/project/internal/controller\"").count(),
        1
    );
}

#[test]
fn controller_only_skips_api_registration() {
    let fs = initialised(project());
    let api = ApiScaffolder {
        resource: false,
        controller: true,
        force: false,
    };

    api.scaffold(&service(&fs), &facets(project(), resource("CronJob")))
        .unwrap();

    let main = main_go(&fs);
    assert!(!main.contains("batchv1"));
    assert!(main.contains("CronJobReconciler"));
    assert!(fs.contents("api/v1/cronjob_types.go").is_none());
}

#[test]
fn existing_types_file_stops_the_run() {
    let fs = initialised(project());
    let svc = service(&fs);
    let facets = facets(project(), resource("CronJob"));
    ApiScaffolder::default().scaffold(&svc, &facets).unwrap();
    let before = main_go(&fs);

    let err = ApiScaffolder::default().scaffold(&svc, &facets).unwrap_err();

    assert!(matches!(
        err.root_cause(),
        GraftError::Domain(DomainError::FileConflict { .. })
    ));
    assert_eq!(main_go(&fs), before);
}

#[test]
fn force_overwrites_types_file() {
    let fs = initialised(project())
        .with_file("api/v1/cronjob_types.go", "package v1\n");

    let report = ApiScaffolder {
        force: true,
        ..ApiScaffolder::default()
    }
    .scaffold(&service(&fs), &facets(project(), resource("CronJob")))
    .unwrap();

    assert_eq!(
        report.outcome_for("api/v1/cronjob_types.go").unwrap().action,
        FileAction::Overwritten
    );
    assert!(fs
        .contents("api/v1/cronjob_types.go")
        .unwrap()
        .contains("type CronJob struct"));
}

#[test]
fn missing_anchor_leaves_file_untouched() {
    let original = "package main\n\nimport (\n\t// +graft:scaffold:cmd/main.go:imports\n)\n";
    let fs = MemoryFilesystem::new().with_file("cmd/main.go", original);
    let api = ApiScaffolder {
        resource: false,
        ..ApiScaffolder::default()
    };

    let err = api
        .scaffold(&service(&fs), &facets(project(), resource("CronJob")))
        .unwrap_err();

    match err.root_cause() {
        GraftError::Domain(DomainError::MarkerNotFound { marker, .. }) => {
            assert_eq!(marker, "scheme")
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(main_go(&fs), original);
}

#[test]
fn api_without_entrypoint_keeps_earlier_files() {
    let fs = MemoryFilesystem::new();

    let err = ApiScaffolder::default()
        .scaffold(&service(&fs), &facets(project(), resource("CronJob")))
        .unwrap_err();

    assert!(matches!(err, GraftError::Scaffold { ref builder, .. } if builder == "main-updater"));
    assert!(fs.contents("api/v1/cronjob_types.go").is_some());
}

#[test]
fn webhook_adds_chart_and_guarded_setup() {
    let fs = initialised(project());

    let report = WebhookScaffolder::default()
        .scaffold(&service(&fs), &facets(project(), resource("CronJob")))
        .unwrap();

    assert_eq!(
        report
            .outcome_for("config/charts/project/.helmignore")
            .unwrap()
            .action,
        FileAction::Skipped
    );
    let svc = fs
        .contents("config/charts/project/templates/webhook/service.yaml")
        .unwrap();
    assert!(svc.contains("{{ include"));

    let chart = "config/charts/project/templates";
    for (path, action) in [
        (format!("{chart}/_helpers.tpl"), FileAction::Created),
        (format!("{chart}/webhook/cert-manager-check.yaml"), FileAction::Created),
        (format!("{chart}/webhook/service.yaml"), FileAction::Created),
        (format!("{chart}/webhook/certificate.yaml"), FileAction::Created),
    ] {
        assert_eq!(report.outcome_for(&path).unwrap().action, action, "{path}");
    }
    assert!(fs
        .contents(&format!("{chart}/_helpers.tpl"))
        .unwrap()
        .contains("define \"chart.webhookCertSecret\""));
    assert!(fs
        .contents(&format!("{chart}/webhook/certificate.yaml"))
        .unwrap()
        .contains("secretName: {{ include \"chart.webhookCertSecret\" . }}"));

    // Helpers are regenerated on every run; hand-edited manifests are kept.
    let edited = format!("{chart}/webhook/certificate.yaml");
    let fs = fs.with_file(&edited, "# tuned by hand\n");
    let rerun = WebhookScaffolder::default()
        .scaffold(&service(&fs), &facets(project(), resource("CronJob")))
        .unwrap();
    assert_eq!(
        rerun.outcome_for(&format!("{chart}/_helpers.tpl")).unwrap().action,
        FileAction::Overwritten
    );
    assert_eq!(rerun.outcome_for(&edited).unwrap().action, FileAction::Skipped);
    assert_eq!(fs.contents(&edited).unwrap(), "# tuned by hand\n");

    let main = main_go(&fs);
    assert!(main.contains("\tif os.Getenv(\"DISABLE_WEBHOOKS\") != \"true\" {\n"));
    assert!(main.contains("(&batchv1.CronJob{}).SetupWebhookWithManager(mgr)"));
    assert!(!main.contains("CronJobReconciler"));
}

#[test]
fn controller_wiring_follows_layout_and_grouping() {
    let cases = [
        (Layout::Nested, false, "cmd/main.go", "\t\"tutorial.io/project/internal/controller\"\n", "&controller.CronJobReconciler"),
        (Layout::Nested, true, "cmd/main.go", "\tbatchcontroller \"tutorial.io/project/internal/controller/batch\"\n", "&batchcontroller.CronJobReconciler"),
        (Layout::Legacy, false, "main.go", "\t\"tutorial.io/project/controllers\"\n", "&controllers.CronJobReconciler"),
        (Layout::Legacy, true, "main.go", "\tbatchcontroller \"tutorial.io/project/controllers/batch\"\n", "&batchcontroller.CronJobReconciler"),
    ];

    for (layout, multi, path, import, setup) in cases {
        let project = project().with_layout(layout).with_multi_group(multi);
        let fs = initialised(project.clone());
        ApiScaffolder {
            resource: false,
            ..ApiScaffolder::default()
        }
        .scaffold(&service(&fs), &facets(project, resource("CronJob")))
        .unwrap();

        let main = fs.contents(path).unwrap();
        assert!(main.contains(import), "{layout} multi={multi}");
        assert!(main.contains(setup), "{layout} multi={multi}");
    }
}

#[test]
fn local_filesystem_run() {
    let dir = tempfile::tempdir().unwrap();
    let fs = LocalFilesystem::new(dir.path());
    let svc = ScaffoldService::new(Box::new(fs), Box::new(HandlebarsRenderer::new()));
    let facets = facets(project(), resource("CronJob"));

    InitScaffolder::default().scaffold(&svc, &facets).unwrap();
    ApiScaffolder::default().scaffold(&svc, &facets).unwrap();
    let first = std::fs::read_to_string(dir.path().join("cmd/main.go")).unwrap();
    ApiScaffolder {
        resource: false,
        ..ApiScaffolder::default()
    }
    .scaffold(&svc, &facets)
    .unwrap();

    let second = std::fs::read_to_string(dir.path().join("cmd/main.go")).unwrap();
    assert_eq!(first, second);
    assert!(dir.path().join("api/v1/cronjob_types.go").is_file());
}

proptest! {
    #[test]
    fn repeated_wiring_equals_single_wiring(
        runs in 1usize..4,
        controller in any::<bool>(),
        webhook in any::<bool>(),
    ) {
        let once = initialised(project());
        let many = initialised(project());
        let facets = facets(project(), resource("CronJob"));
        let wire = |fs: &MemoryFilesystem| {
            ApiScaffolder { resource: false, controller, force: false }
                .scaffold(&service(fs), &facets)
                .unwrap();
            if webhook {
                WebhookScaffolder::default().scaffold(&service(fs), &facets).unwrap();
            }
        };

        wire(&once);
        for _ in 0..runs {
            wire(&many);
        }

        prop_assert_eq!(main_go(&once), main_go(&many));
    }
}
