//! Test case model for the smithy differential harness.
//!
//! A test case is one generated source program, identified by an integer ID
//! and a source language. Every stage of the pipeline writes a flat file named
//! `{id}.{ext}` into the working directory; this crate owns that naming scheme
//! and the probing that hands out fresh IDs.

mod allocate;
mod artifact;
mod case;
mod error;
mod language;

pub use allocate::allocate_id;
pub use artifact::{ArtifactLayout, PipelineState, Stage};
pub use case::TestCase;
pub use error::{CaseError, Result};
pub use language::Language;
