//! Core domain layer for graft.
//!
//! Pure logic only: path resolution, existence policy decisions and marker
//! injection all work on in-memory values. Filesystem access and template
//! rendering are reached through the ports in the application layer.
//!
//! - **No I/O**: no filesystem, network or process calls
//! - **Deterministic**: the same inputs always give the same output
//! - **Immutable inputs**: descriptors and contexts are read-only for a run

pub mod entities;
pub mod error;
pub mod injector;
pub mod path;
pub mod policy;

mod validation;

pub use entities::{
    common::{RelativePath, short_hash, to_kebab_case, to_pascal_case, to_snake_case},
    facets::{Facet, Facets},
    fragment::Fragment,
    inserter::InserterSpec,
    marker::{CommentStyle, MARKER_PREFIX, Marker},
    project::{Layout, ProjectContext},
    resource::{ResourceDescriptor, ResourceDescriptorBuilder},
    scheme::{SchemeEntry, SchemeRegistry},
    template::{ExistencePolicy, RenderContext, ResourceView, TemplateBody, TemplateSpec},
};
pub use error::{DomainError, ErrorCategory};
pub use injector::{Injection, inject};
pub use path::resolve_path;
pub use policy::{WriteDecision, enforce};
pub use validation::DomainValidator;
