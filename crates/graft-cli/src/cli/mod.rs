//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "graft",
    bin_name = "graft",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Marker-based scaffolding for operator projects",
    long_about = "graft scaffolds a controller project and then grows it: new APIs, \
                  controllers and webhooks are injected at marker comments without \
                  touching hand-written code.",
    after_help = "EXAMPLES:\n\
        \x20 graft init --repo tutorial.io/project --domain tutorial.io\n\
        \x20 graft create api --group batch --version v1 --kind CronJob\n\
        \x20 graft create webhook --group batch --version v1 --kind CronJob\n\
        \x20 graft completions bash > /usr/share/bash-completion/completions/graft",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialise a project: write graft.toml and the entrypoint.
    #[command(
        about = "Initialise a project",
        after_help = "EXAMPLES:\n\
            \x20 graft init --repo tutorial.io/project --domain tutorial.io\n\
            \x20 graft init --repo tutorial.io/project --domain tutorial.io --multigroup\n\
            \x20 graft -C ./project init --repo tutorial.io/project --domain tutorial.io --legacy-layout"
    )]
    Init(InitArgs),

    /// Add an API, controller or webhook to an initialised project.
    #[command(about = "Scaffold a resource", subcommand)]
    Create(CreateCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 graft completions bash > ~/.local/share/bash-completion/completions/graft\n\
            \x20 graft completions zsh  > ~/.zfunc/_graft\n\
            \x20 graft completions fish > ~/.config/fish/completions/graft.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 graft config show\n\
            \x20 graft config get project.domain\n\
            \x20 graft config path"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `graft init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Go module path of the project.
    #[arg(long = "repo", value_name = "MODULE", help = "Go module path")]
    pub repo: String,

    /// Domain appended to every API group.
    #[arg(long = "domain", value_name = "DOMAIN", help = "API group domain")]
    pub domain: String,

    /// Project name; defaults to the last segment of the module path.
    #[arg(long = "project-name", value_name = "NAME", help = "Project name")]
    pub project_name: Option<String>,

    /// Lay APIs and controllers out per group.
    #[arg(long = "multigroup", help = "Enable multi-group layout")]
    pub multigroup: bool,

    /// Use the flat pre-`cmd/` layout (`main.go`, `controllers/`).
    #[arg(long = "legacy-layout", help = "Use the legacy flat layout")]
    pub legacy_layout: bool,

    /// License header file prepended to generated Go files.
    #[arg(
        long = "boilerplate",
        value_name = "FILE",
        help = "Boilerplate header file (relative to the project dir)"
    )]
    pub boilerplate: Option<PathBuf>,

    /// Overwrite graft.toml and regenerate every file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing files")]
    pub force: bool,
}

// ── create ────────────────────────────────────────────────────────────────────

/// Subcommands for `graft create`.
#[derive(Debug, Subcommand)]
pub enum CreateCommands {
    /// Scaffold API types and wire them into the entrypoint.
    #[command(after_help = "EXAMPLES:\n\
        \x20 graft create api --group batch --version v1 --kind CronJob\n\
        \x20 graft create api --group batch --version v1 --kind CronJob --no-controller\n\
        \x20 graft create api --version v1 --kind Node --no-resource")]
    Api(ApiArgs),

    /// Wire a webhook for an existing API.
    #[command(after_help = "EXAMPLES:\n\
        \x20 graft create webhook --group batch --version v1 --kind CronJob")]
    Webhook(WebhookArgs),
}

/// Group/version/kind of the resource being scaffolded.
#[derive(Debug, Args)]
pub struct ResourceArgs {
    /// API group; leave empty for core resources.
    #[arg(long = "group", value_name = "GROUP", default_value = "")]
    pub group: String,

    /// API version, e.g. `v1`.
    #[arg(long = "version", value_name = "VERSION")]
    pub api_version: String,

    /// Kind, e.g. `CronJob`.
    #[arg(long = "kind", value_name = "KIND")]
    pub kind: String,
}

/// Arguments for `graft create api`.
#[derive(Debug, Args)]
pub struct ApiArgs {
    #[command(flatten)]
    pub resource: ResourceArgs,

    /// Resource plural when it is not `<kind>s`.
    #[arg(long = "plural", value_name = "PLURAL")]
    pub plural: Option<String>,

    /// Mark the resource cluster scoped.
    #[arg(long = "cluster-scoped")]
    pub cluster_scoped: bool,

    /// Skip the types file and scheme registration.
    #[arg(long = "no-resource")]
    pub no_resource: bool,

    /// Skip the reconciler wiring.
    #[arg(long = "no-controller")]
    pub no_controller: bool,

    /// Overwrite an existing types file.
    #[arg(short = 'f', long = "force")]
    pub force: bool,
}

/// Arguments for `graft create webhook`.
#[derive(Debug, Args)]
pub struct WebhookArgs {
    #[command(flatten)]
    pub resource: ResourceArgs,

    /// Regenerate the chart manifests.
    #[arg(short = 'f', long = "force")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `graft completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `graft config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML.
    Show,
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `project.domain`.
        key: String,
    },
    /// Print the project and user configuration file paths.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
