//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use graft_core::application::{FileAction, FileOutcome, ScaffoldReport};
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// Generic message; suppressed in quiet and JSON modes.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// One line per file touched, or a JSON array in JSON mode.
    ///
    /// JSON is written even when quiet; it is the command's result.
    pub fn report(&self, report: &ScaffoldReport) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            let json = report_json(report);
            return self.term.write_line(&json.to_string());
        }
        if self.quiet {
            return Ok(());
        }
        for outcome in report.outcomes() {
            self.term.write_line(&self.outcome_line(outcome))?;
        }
        Ok(())
    }

    fn outcome_line(&self, outcome: &FileOutcome) -> String {
        let action = format!("{:>11}", outcome.action.as_str());
        if self.no_color {
            return format!("{action} {}", outcome.path);
        }
        let action = match outcome.action {
            FileAction::Created | FileAction::Updated => action.green().to_string(),
            FileAction::Overwritten => action.yellow().to_string(),
            FileAction::Skipped | FileAction::Unchanged => action.dimmed().to_string(),
        };
        format!("{action} {}", outcome.path)
    }

    fn silent(&self) -> bool {
        self.quiet || self.resolved_format == OutputFormat::Json
    }

    /// A command's result value; written even when quiet.
    pub fn value(&self, text: &str) -> io::Result<()> {
        self.term.write_line(text)
    }
}

fn report_json(report: &ScaffoldReport) -> serde_json::Value {
    report
        .outcomes()
        .iter()
        .map(|o| {
            serde_json::json!({
                "builder": o.builder,
                "path": o.path.to_slash_string(),
                "action": o.action.as_str(),
            })
        })
        .collect()
}

// ── tests ─────────────────────────────────────────────────────────────────────
