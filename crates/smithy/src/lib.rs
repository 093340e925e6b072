//! Smithy - differential testing harness for the ll2w backend
//!
//! Generates random C/C++ programs, takes a reference checksum from a native
//! build, then pushes the same program through clang's LLVM IR (for a fixed
//! foreign target), the ll2w translator and the bytecode assembler/linker.
//!
//! # Example
//!
//! ```ignore
//! use smithy::{Harness, HarnessConfig, Language, SystemToolchain, VerifyOptions};
//!
//! let harness = Harness::new(SystemToolchain::default(), HarnessConfig::default());
//! let mut case = harness.generate(Language::Cpp, 0)?;
//! let report = harness.verify(&mut case, &VerifyOptions::default())?;
//! println!("native checksum: {}", report.checksum);
//! ```

pub use smithy_case::{
    ArtifactLayout, CaseError, Language, PipelineState, Stage, TestCase, allocate_id,
};
pub use smithy_toolchain::{
    DEFAULT_TARGET_TRIPLE, Diagnostic, OptLevel, OptimizationSpec, StageOutcome, SystemToolchain,
    ToolError, Toolchain, ToolchainConfig,
};

mod checksum;
mod error;
mod harness;
mod runtime;

pub use checksum::extract_checksum;
pub use error::{Error, Result};
pub use harness::{
    Harness, HarnessConfig, Step, Verdict, VerifyOptions, VerifyOutcome, VerifyReport,
};
pub use runtime::{
    DEFAULT_RUNTIME_ARTIFACT, DEFAULT_RUNTIME_SOURCE, RuntimeLibrary, RuntimeStatus,
};
