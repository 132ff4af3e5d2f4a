pub mod common;
pub mod facets;
pub mod fragment;
pub mod inserter;
pub mod marker;
pub mod project;
pub mod resource;
pub mod scheme;
pub mod template;

pub use crate::domain::DomainError;
pub use facets::{Facet, Facets};
pub use fragment::Fragment;
pub use inserter::InserterSpec;
pub use marker::Marker;
pub use project::{Layout, ProjectContext};
pub use resource::ResourceDescriptor;
pub use template::{ExistencePolicy, RenderContext, TemplateBody, TemplateSpec};
