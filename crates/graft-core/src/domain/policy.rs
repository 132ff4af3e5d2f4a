use crate::domain::{
    entities::{common::RelativePath, template::ExistencePolicy},
    error::DomainError,
};

/// What the orchestrator should do with a rendered template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    /// The file does not exist yet.
    Create,
    /// Replace the existing file.
    Overwrite,
    /// Leave the existing file alone.
    Skip,
}

impl WriteDecision {
    pub fn writes(&self) -> bool {
        !matches!(self, Self::Skip)
    }
}

/// Decide how to treat a template target.
///
/// `force` reclassifies `Skip` and `Error` as `Overwrite`.
pub fn enforce(
    path: &RelativePath,
    exists: bool,
    policy: ExistencePolicy,
    force: bool,
) -> Result<WriteDecision, DomainError> {
    if !exists {
        return Ok(WriteDecision::Create);
    }
    let policy = if force {
        ExistencePolicy::Overwrite
    } else {
        policy
    };
    match policy {
        ExistencePolicy::Skip => Ok(WriteDecision::Skip),
        ExistencePolicy::Overwrite => Ok(WriteDecision::Overwrite),
        ExistencePolicy::Error => Err(DomainError::FileConflict {
            path: path.as_path().to_path_buf(),
        }),
    }
}
