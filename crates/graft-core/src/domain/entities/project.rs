use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// File layout of the generated project.
///
/// `Legacy` is the flat layout (`main.go`, `controllers/`) kept for projects
/// generated before the nested layout (`cmd/main.go`, `internal/controller/`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Nested,
    Legacy,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nested => "nested",
            Self::Legacy => "legacy",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nested" | "go/v4" => Ok(Self::Nested),
            "legacy" | "flat" | "go/v3" => Ok(Self::Legacy),
            other => Err(DomainError::InvalidResource(format!(
                "unknown layout '{other}' (expected 'nested' or 'legacy')"
            ))),
        }
    }
}

/// Read-only project identity shared by every builder in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectContext {
    repo: String,
    domain: String,
    project_name: String,
    multi_group: bool,
    layout: Layout,
}

impl ProjectContext {
    /// Create a single-group, nested-layout project context.
    ///
    /// The project name defaults to the last segment of the repo path.
    pub fn new(repo: impl Into<String>, domain: impl Into<String>) -> Self {
        let repo = repo.into();
        let project_name = repo
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            repo,
            domain: domain.into(),
            project_name,
            multi_group: false,
            layout: Layout::default(),
        }
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    pub fn with_multi_group(mut self, multi_group: bool) -> Self {
        self.multi_group = multi_group;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn is_multi_group(&self) -> bool {
        self.multi_group
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn is_legacy_layout(&self) -> bool {
        self.layout == Layout::Legacy
    }
}
