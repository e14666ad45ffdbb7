//! Error type shared by every pipeline stage.
//!
//! Root-level errors (`RootNotFound`, `Traversal`, `InvalidConfig`) abort a run
//! before any project is dispatched. Everything else is scoped to one project
//! and ends up in the run summary.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("build tree root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("failed to traverse {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid configuration {}: {reason}", path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed project filters {}: {reason}", path.display())]
    MalformedManifest { path: PathBuf, reason: String },

    #[error(
        "project {project}: filters '{first}' and '{second}' both map to identifier {identifier}"
    )]
    IdentifierCollision {
        project: String,
        first: String,
        second: String,
        identifier: String,
    },

    #[error("project {project}: failed to write {}: {source}", path.display())]
    OutputWriteFailure {
        project: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "project {project}: {} and {} write the same output",
        first.display(),
        second.display()
    )]
    DuplicateProject {
        project: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("project {project}: {} is out of date", path.display())]
    OutdatedOutput { project: String, path: PathBuf },
}

impl GenerateError {
    /// Stable label printed in the run summary.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerateError::RootNotFound(_) => "RootNotFound",
            GenerateError::Traversal { .. } => "Traversal",
            GenerateError::InvalidConfig { .. } => "InvalidConfig",
            GenerateError::ReadFailure { .. } => "ReadFailure",
            GenerateError::MalformedManifest { .. } => "MalformedManifest",
            GenerateError::IdentifierCollision { .. } => "IdentifierCollision",
            GenerateError::OutputWriteFailure { .. } => "OutputWriteFailure",
            GenerateError::DuplicateProject { .. } => "DuplicateProject",
            GenerateError::OutdatedOutput { .. } => "OutdatedOutput",
        }
    }

    /// True for errors that stop the whole run rather than one project.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GenerateError::RootNotFound(_)
                | GenerateError::Traversal { .. }
                | GenerateError::InvalidConfig { .. }
        )
    }
}
