//! Integration tests for the graft binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn graft(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("graft");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn init(dir: &Path) {
    graft(dir)
        .args(["init", "--repo", "tutorial.io/project", "--domain", "tutorial.io"])
        .assert()
        .success();
}

fn create_api(dir: &Path, extra: &[&str]) -> assert_cmd::assert::Assert {
    graft(dir)
        .args(["create", "api", "--group", "batch", "--version", "v1", "--kind", "CronJob"])
        .args(extra)
        .assert()
}

fn read(dir: &Path, path: &str) -> String {
    fs::read_to_string(dir.join(path)).unwrap()
}

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    graft(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    graft(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn init_writes_project_file_and_entrypoint() {
    let temp = TempDir::new().unwrap();

    graft(temp.path())
        .args(["init", "--repo", "tutorial.io/project", "--domain", "tutorial.io"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created cmd/main.go"))
        .stdout(predicate::str::contains("created config/charts/project/.helmignore"));

    let toml = read(temp.path(), "graft.toml");
    assert!(toml.contains("repo = \"tutorial.io/project\""));
    assert!(toml.contains("layout = \"nested\""));
    let main = read(temp.path(), "cmd/main.go");
    assert!(main.contains("// +graft:scaffold:cmd/main.go:builder"));
}

#[test]
fn init_uses_boilerplate_file() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("hack")).unwrap();
    fs::write(
        temp.path().join("hack/boilerplate.go.txt"),
        "/*\nCopyright 2026 The Tutorial Authors.\n*/\n",
    )
    .unwrap();

    init(temp.path());

    assert!(read(temp.path(), "cmd/main.go").starts_with("/*\nCopyright 2026 The Tutorial Authors.\n*/\n\npackage main"));
}

#[test]
fn legacy_layout_puts_main_at_root() {
    let temp = TempDir::new().unwrap();
    graft(temp.path())
        .args([
            "init",
            "--repo",
            "tutorial.io/project",
            "--domain",
            "tutorial.io",
            "--legacy-layout",
        ])
        .assert()
        .success();
    create_api(temp.path(), &["--no-resource"]).success();

    let main = read(temp.path(), "main.go");
    assert!(main.contains("\t\"tutorial.io/project/controllers\"\n"));
    assert!(main.contains("&controllers.CronJobReconciler{"));
    assert!(!temp.path().join("cmd/main.go").exists());
}

#[test]
fn project_dir_flag_roots_every_path() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");

    graft(temp.path())
        .args(["-C", "project", "init", "--repo", "tutorial.io/project", "--domain", "tutorial.io"])
        .assert()
        .success();

    assert!(project.join("graft.toml").is_file());
    assert!(project.join("cmd/main.go").is_file());
}

#[test]
fn create_api_wires_entrypoint_and_records_resource() {
    let temp = TempDir::new().unwrap();
    init(temp.path());

    create_api(temp.path(), &[])
        .success()
        .stdout(predicate::str::contains("created api/v1/cronjob_types.go"))
        .stdout(predicate::str::contains("updated cmd/main.go"));

    let main = read(temp.path(), "cmd/main.go");
    assert!(main.contains("\tbatchv1 \"tutorial.io/project/api/v1\"\n"));
    assert!(main.contains("\tutilruntime.Must(batchv1.AddToScheme(scheme))\n"));
    assert!(main.contains("\tif err = (&controller.CronJobReconciler{\n"));

    let toml = read(temp.path(), "graft.toml");
    assert!(toml.contains("[[resources]]"));
    assert!(toml.contains("kind = \"CronJob\""));
}

#[test]
fn forced_rerun_leaves_entrypoint_unchanged() {
    let temp = TempDir::new().unwrap();
    init(temp.path());
    create_api(temp.path(), &[]).success();
    let before = read(temp.path(), "cmd/main.go");

    create_api(temp.path(), &["--force"])
        .success()
        .stdout(predicate::str::contains("overwritten api/v1/cronjob_types.go"))
        .stdout(predicate::str::contains("unchanged cmd/main.go"));

    assert_eq!(read(temp.path(), "cmd/main.go"), before);
}

#[test]
fn create_webhook_adds_chart_and_setup() {
    let temp = TempDir::new().unwrap();
    init(temp.path());
    create_api(temp.path(), &[]).success();

    graft(temp.path())
        .args(["create", "webhook", "--group", "batch", "--version", "v1", "--kind", "CronJob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created config/charts/project/templates/webhook/service.yaml"));

    let main = read(temp.path(), "cmd/main.go");
    assert!(main.contains("(&batchv1.CronJob{}).SetupWebhookWithManager(mgr)"));
    assert!(read(temp.path(), "graft.toml").contains("webhook = true"));
}

#[test]
fn reinit_with_force_registers_recorded_apis() {
    let temp = TempDir::new().unwrap();
    init(temp.path());
    create_api(temp.path(), &[]).success();

    graft(temp.path())
        .args(["init", "--repo", "tutorial.io/project", "--domain", "tutorial.io", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("overwritten cmd/main.go"));

    // The rewritten entrypoint lists the API through the scheme registry.
    let main = read(temp.path(), "cmd/main.go");
    assert!(main.contains("\tbatchv1 \"tutorial.io/project/api/v1\"\n"));
    assert!(!main.contains("CronJobReconciler"));
}

#[test]
fn json_output_is_machine_readable() {
    let temp = TempDir::new().unwrap();
    init(temp.path());

    let out = graft(temp.path())
        .args(["--output-format", "json", "create", "api", "--group", "batch", "--version", "v1", "--kind", "CronJob"])
        .output()
        .unwrap();

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1, "{stdout}");
    assert!(stdout.contains("\"action\":\"created\""));
    assert!(stdout.contains("\"builder\":\"main-updater\""));
}

#[test]
fn config_get_reads_project_file() {
    let temp = TempDir::new().unwrap();
    init(temp.path());

    graft(temp.path())
        .args(["config", "get", "project.domain"])
        .assert()
        .success()
        .stdout("tutorial.io\n");
}

#[test]
fn environment_overrides_project_file() {
    let temp = TempDir::new().unwrap();
    init(temp.path());

    graft(temp.path())
        .env("GRAFT_PROJECT__DOMAIN", "override.io")
        .args(["config", "get", "project.domain"])
        .assert()
        .success()
        .stdout("override.io\n");
}

#[test]
fn completions_generate_for_bash() {
    let temp = TempDir::new().unwrap();
    graft(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("graft"));
}

#[test]
fn no_color_env_accepts_common_values() {
    let temp = TempDir::new().unwrap();
    for value in ["1", "true", "yes", "0", ""] {
        graft(temp.path())
            .env("NO_COLOR", value)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("graft.toml"));
    }
}

#[test]
fn environment_overrides_are_not_persisted() {
    let temp = TempDir::new().unwrap();
    init(temp.path());
    let mut before: toml::Table = toml::from_str(&read(temp.path(), "graft.toml")).unwrap();

    graft(temp.path())
        .env("GRAFT_PROJECT__DOMAIN", "override.io")
        .env("GRAFT_OUTPUT__NO_COLOR", "true")
        .args(["create", "api", "--group", "batch", "--version", "v1", "--kind", "CronJob"])
        .assert()
        .success();

    let text = read(temp.path(), "graft.toml");
    assert!(!text.contains("override.io"), "{text}");
    assert!(!text.contains("[output]"), "{text}");

    let mut after: toml::Table = toml::from_str(&text).unwrap();
    let resources = after.remove("resources").unwrap();
    assert_eq!(resources.as_array().map(Vec::len), Some(1));
    before.remove("resources");
    assert_eq!(after, before);
}
