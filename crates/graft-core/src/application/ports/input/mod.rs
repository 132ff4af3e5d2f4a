//! Builder ports.
//!
//! A builder turns the run's facets into a declarative spec. It never
//! touches the filesystem; the orchestrator resolves, renders, decides and
//! writes.

use crate::domain::{Facet, Facets, InserterSpec, TemplateSpec};
use crate::error::GraftResult;

/// Produces a file that may not exist yet.
pub trait TemplateBuilder: Send + Sync {
    /// Stable name used in logs, reports and errors.
    fn name(&self) -> &str;

    /// Facets that must be supplied before [`Self::template`] runs.
    fn required_facets(&self) -> &[Facet] {
        &[]
    }

    fn template(&self, facets: &Facets) -> GraftResult<TemplateSpec>;
}

/// Updates an existing file at its markers.
pub trait InserterBuilder: Send + Sync {
    fn name(&self) -> &str;

    fn required_facets(&self) -> &[Facet] {
        &[]
    }

    fn inserter(&self, facets: &Facets) -> GraftResult<InserterSpec>;
}

/// One step of a scaffold run.
pub enum Builder {
    Template(Box<dyn TemplateBuilder>),
    Inserter(Box<dyn InserterBuilder>),
}

impl Builder {
    pub fn template(builder: impl TemplateBuilder + 'static) -> Self {
        Self::Template(Box::new(builder))
    }

    pub fn inserter(builder: impl InserterBuilder + 'static) -> Self {
        Self::Inserter(Box::new(builder))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Template(b) => b.name(),
            Self::Inserter(b) => b.name(),
        }
    }

    pub fn required_facets(&self) -> &[Facet] {
        match self {
            Self::Template(b) => b.required_facets(),
            Self::Inserter(b) => b.required_facets(),
        }
    }
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Template(b) => f.debug_tuple("Template").field(&b.name()).finish(),
            Self::Inserter(b) => f.debug_tuple("Inserter").field(&b.name()).finish(),
        }
    }
}
