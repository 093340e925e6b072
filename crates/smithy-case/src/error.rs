use std::path::PathBuf;

use thiserror::Error;

/// Test case errors.
#[derive(Error, Debug)]
pub enum CaseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid language: {0}")]
    InvalidLanguage(String),
    #[error("File {} not found", .0.display())]
    SourceNotFound(PathBuf),
    #[error("No free test case ID at or above {0}")]
    IdsExhausted(u64),
}

pub type Result<T> = std::result::Result<T, CaseError>;
