use crate::domain::{
    entities::{
        common::RelativePath,
        inserter::InserterSpec,
        marker::Marker,
        template::{TemplateBody, TemplateSpec},
    },
    error::DomainError,
};

/// Centralized checks run on builder output before anything touches disk.
pub struct DomainValidator;

impl DomainValidator {
    /// Marker names must be well formed, and a template can only plant
    /// markers through a parameterized body that references them.
    pub fn validate_template(spec: &TemplateSpec, path: &RelativePath) -> Result<(), DomainError> {
        for name in spec.markers() {
            Marker::new(path.clone(), name.as_str())?;
            let planted = match spec.body() {
                TemplateBody::Literal(_) => false,
                TemplateBody::Parameterized(body) => plants(body, name),
            };
            if !planted {
                return Err(DomainError::InvalidMarker {
                    name: name.clone(),
                    reason: format!("declared for {path} but never planted by its body"),
                });
            }
        }
        Ok(())
    }

    pub fn validate_inserter(spec: &InserterSpec, path: &RelativePath) -> Result<(), DomainError> {
        if spec.markers().is_empty() {
            return Err(DomainError::InvalidMarker {
                name: String::new(),
                reason: format!("inserter for {path} declares no markers"),
            });
        }
        for name in spec.markers() {
            Marker::new(path.clone(), name.as_str())?;
        }
        spec.validate()
    }
}

/// True when `body` holds a `{{markers.<name>}}` expression for exactly `name`.
fn plants(body: &str, name: &str) -> bool {
    let reference = format!("markers.{name}");
    body.split("{{").skip(1).any(|rest| {
        rest.split_once("}}")
            .is_some_and(|(expr, _)| expr.trim().trim_matches('~').trim() == reference)
    })
}
