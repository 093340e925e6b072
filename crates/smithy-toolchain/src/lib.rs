//! External collaborators of the smithy harness.
//!
//! The pipeline never spawns processes directly. Every tool it relies on is
//! reached through the [`Toolchain`] trait, whose real implementation
//! ([`SystemToolchain`]) shells out to `csmith`, `clang++`, `ll2w`, `wasmc`
//! and `wld`. Tests substitute fakes implementing the same contract.

mod command;
mod config;
mod error;
mod opt;
mod system;
mod toolchain;

pub use config::{DEFAULT_STD, DEFAULT_TARGET_TRIPLE, ToolchainConfig};
pub use error::{Result, ToolError};
pub use opt::{OptLevel, OptimizationSpec};
pub use system::SystemToolchain;
pub use toolchain::{Diagnostic, StageOutcome, Toolchain};
