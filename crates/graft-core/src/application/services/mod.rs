//! Application services - orchestrate use cases.

pub mod scaffold_service;

pub use scaffold_service::{FileAction, FileOutcome, ScaffoldReport, ScaffoldService};
