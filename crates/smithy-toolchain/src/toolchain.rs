//! The contract between the pipeline and its external tools.

use std::fmt;
use std::path::{Path, PathBuf};

use smithy_case::Language;

use crate::{OptimizationSpec, Result};

/// Diagnostic captured from a tool that rejected its input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub tool: String,
    pub code: Option<i32>,
    pub text: String,
}

impl Diagnostic {
    pub fn new(tool: impl Into<String>, code: Option<i32>, text: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            code,
            text: text.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => writeln!(f, "{} rejected input (exit code {code})", self.tool)?,
            None => writeln!(f, "{} rejected input (killed by signal)", self.tool)?,
        }
        f.write_str(self.text.trim_end())
    }
}

/// Result of a stage whose failure is an expected backend outcome rather
/// than a harness fault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageOutcome {
    Success(PathBuf),
    Rejected(Diagnostic),
}

impl StageOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// External tools used by the pipeline.
///
/// Methods returning `Result<()>` treat a non-zero exit as a fatal error.
/// Methods returning [`StageOutcome`] report a non-zero exit as `Rejected`
/// and reserve `Err` for failures to run the tool at all.
pub trait Toolchain {
    /// Generate a random program in `lang` seeded with `seed`.
    fn generate(&self, lang: Language, seed: u64, output: &Path) -> Result<()>;

    /// Compile `source` to a native executable.
    fn compile_native(&self, lang: Language, source: &Path, output: &Path) -> Result<()>;

    /// Run a native executable and capture its stdout.
    fn run_native(&self, binary: &Path) -> Result<String>;

    /// Emit textual IR for the foreign target.
    fn lower_to_ir(
        &self,
        lang: Language,
        source: &Path,
        opt: &OptimizationSpec,
        output: &Path,
    ) -> Result<()>;

    /// Translate IR to a bytecode module. `runnable` requests a full module
    /// with an entry point rather than a fragment.
    fn translate(&self, ir: &Path, output: &Path, runnable: bool) -> Result<StageOutcome>;

    /// Assemble a bytecode module into linkable form.
    fn assemble(&self, module: &Path, output: &Path) -> Result<StageOutcome>;

    /// Link assembled inputs into a loadable module.
    fn link(&self, inputs: &[&Path], output: &Path) -> Result<StageOutcome>;

    /// Execute a linked module under the VM and capture its stdout.
    /// Returns `None` when no VM is available.
    fn run_module(&self, linked: &Path) -> Result<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new("ll2w", Some(1), "Unsupported instruction: fneg\n\n");
        assert_eq!(
            diag.to_string(),
            "ll2w rejected input (exit code 1)\nUnsupported instruction: fneg"
        );
    }

    #[test]
    fn test_outcome_success() {
        assert!(StageOutcome::Success(PathBuf::from("0.wasm")).is_success());
        assert!(!StageOutcome::Rejected(Diagnostic::new("wasmc", None, "")).is_success());
    }
}
