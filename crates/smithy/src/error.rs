use std::path::PathBuf;

use smithy_case::{CaseError, Stage};
use smithy_toolchain::{Diagnostic, ToolError};
use thiserror::Error;

/// Harness errors.
///
/// A backend rejecting a test case is not an error; see [`crate::StageOutcome`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Case(#[from] CaseError),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("No {stage} artifact: {} not found", .path.display())]
    MissingArtifact { stage: Stage, path: PathBuf },
    #[error("Runtime library source {} not found", .0.display())]
    RuntimeSourceNotFound(PathBuf),
    #[error("Runtime library build failed: {0}")]
    RuntimeBuildRejected(Diagnostic),
    #[error("No reference checksum for test case {0}; run the native stage first")]
    NoReferenceChecksum(u64),
    #[error("{} produced no output", .0.display())]
    EmptyOutput(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
