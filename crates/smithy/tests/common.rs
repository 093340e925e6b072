//! Fake toolchain shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use smithy::{
    Diagnostic, Harness, HarnessConfig, Language, OptimizationSpec, StageOutcome, ToolError,
    Toolchain,
};
use tempfile::TempDir;

/// One recorded tool invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Generate { lang: Language, seed: u64 },
    CompileNative(PathBuf),
    RunNative(PathBuf),
    Lower(Vec<String>),
    Translate { runnable: bool },
    Assemble(PathBuf),
    Link(Vec<PathBuf>),
    RunModule(PathBuf),
}

/// Toolchain that writes deterministic artifacts and records every call.
pub struct FakeToolchain {
    pub calls: RefCell<Vec<Call>>,
    pub native_output: String,
    pub vm_output: Option<String>,
    pub fail_native: bool,
    pub reject_translate: bool,
    pub reject_assemble: bool,
    pub reject_link: bool,
}

impl Default for FakeToolchain {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            native_output: "checksum = 0x1234\n".to_string(),
            vm_output: None,
            fail_native: false,
            reject_translate: false,
            reject_assemble: false,
            reject_link: false,
        }
    }
}

impl FakeToolchain {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Toolchain for FakeToolchain {
    fn generate(&self, lang: Language, seed: u64, output: &Path) -> smithy_toolchain::Result<()> {
        self.record(Call::Generate { lang, seed });
        fs::write(output, format!("/* seed {seed} */\nint main() {{ return 0; }}\n"))?;
        Ok(())
    }

    fn compile_native(
        &self,
        _lang: Language,
        source: &Path,
        output: &Path,
    ) -> smithy_toolchain::Result<()> {
        self.record(Call::CompileNative(source.to_path_buf()));
        if self.fail_native {
            return Err(ToolError::Failed {
                tool: "clang++".to_string(),
                code: Some(1),
                stderr: "error: expected ';'".to_string(),
            });
        }
        fs::write(output, format!("binary of {}", source.display()))?;
        Ok(())
    }

    fn run_native(&self, binary: &Path) -> smithy_toolchain::Result<String> {
        self.record(Call::RunNative(binary.to_path_buf()));
        Ok(self.native_output.clone())
    }

    fn lower_to_ir(
        &self,
        _lang: Language,
        _source: &Path,
        opt: &OptimizationSpec,
        output: &Path,
    ) -> smithy_toolchain::Result<()> {
        self.record(Call::Lower(opt.flags().to_vec()));
        fs::write(output, format!("; opt {opt}\n"))?;
        Ok(())
    }

    fn translate(
        &self,
        _ir: &Path,
        output: &Path,
        runnable: bool,
    ) -> smithy_toolchain::Result<StageOutcome> {
        self.record(Call::Translate { runnable });
        if self.reject_translate {
            return Ok(StageOutcome::Rejected(Diagnostic::new(
                "ll2w",
                Some(1),
                "Unsupported instruction: callbr",
            )));
        }
        fs::write(output, "module\n")?;
        Ok(StageOutcome::Success(output.to_path_buf()))
    }

    fn assemble(&self, module: &Path, output: &Path) -> smithy_toolchain::Result<StageOutcome> {
        self.record(Call::Assemble(module.to_path_buf()));
        if self.reject_assemble {
            return Ok(StageOutcome::Rejected(Diagnostic::new(
                "wasmc",
                Some(2),
                "syntax error at line 3",
            )));
        }
        fs::copy(module, output)?;
        Ok(StageOutcome::Success(output.to_path_buf()))
    }

    fn link(&self, inputs: &[&Path], output: &Path) -> smithy_toolchain::Result<StageOutcome> {
        self.record(Call::Link(inputs.iter().map(|p| p.to_path_buf()).collect()));
        if self.reject_link {
            return Ok(StageOutcome::Rejected(Diagnostic::new(
                "wld",
                Some(1),
                "undefined symbol: main",
            )));
        }
        fs::write(output, "linked\n")?;
        Ok(StageOutcome::Success(output.to_path_buf()))
    }

    fn run_module(&self, linked: &Path) -> smithy_toolchain::Result<Option<String>> {
        self.record(Call::RunModule(linked.to_path_buf()));
        Ok(self.vm_output.clone())
    }
}

/// Harness over a fake toolchain in a fresh temp dir, with a runtime source.
pub fn harness(toolchain: FakeToolchain) -> (TempDir, Harness<FakeToolchain>) {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(temp.path().join("libll2w.wasm"), "runtime\n").expect("write runtime source");
    let config = HarnessConfig::new().with_work_dir(temp.path());
    let harness = Harness::new(toolchain, config);
    (temp, harness)
}
