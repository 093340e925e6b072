//! Toolchain implementation that shells out to the installed tools.

use std::fs;
use std::path::Path;
use std::process::Command;

use smithy_case::Language;
use tracing::{debug, info};

use crate::command::{self, capture, diagnostic, executable_path};
use crate::{OptimizationSpec, Result, StageOutcome, Toolchain, ToolchainConfig};

/// Runs the real external tools.
#[derive(Clone, Debug, Default)]
pub struct SystemToolchain {
    config: ToolchainConfig,
}

impl SystemToolchain {
    #[must_use]
    pub const fn new(config: ToolchainConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ToolchainConfig {
        &self.config
    }

    /// Classify a captured run: non-zero exit becomes `Rejected`.
    fn outcome(tool: &str, cmd: &mut Command, output_path: &Path) -> Result<StageOutcome> {
        let output = capture(tool, cmd)?;
        if output.status.success() {
            Ok(StageOutcome::Success(output_path.to_path_buf()))
        } else {
            Ok(StageOutcome::Rejected(diagnostic(tool, &output)))
        }
    }
}

impl Toolchain for SystemToolchain {
    fn generate(&self, lang: Language, seed: u64, output: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.config.generator);
        cmd.args(ToolchainConfig::generator_flags(lang))
            .arg("--seed")
            .arg(seed.to_string())
            .arg("-o")
            .arg(output);
        command::run(&self.config.generator, &mut cmd)?;
        Ok(())
    }

    fn compile_native(&self, _lang: Language, source: &Path, output: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.config.cxx);
        cmd.args(self.config.common_flags())
            .arg(source)
            .arg("-o")
            .arg(output);
        command::run(&self.config.cxx, &mut cmd)?;
        Ok(())
    }

    fn run_native(&self, binary: &Path) -> Result<String> {
        let exe = executable_path(binary);
        let tool = exe.display().to_string();
        let output = command::run(&tool, &mut Command::new(&exe))?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn lower_to_ir(
        &self,
        _lang: Language,
        source: &Path,
        opt: &OptimizationSpec,
        output: &Path,
    ) -> Result<()> {
        let mut cmd = Command::new(&self.config.cxx);
        cmd.args(self.config.common_flags())
            .args(self.config.ir_flags())
            .args(opt.flags())
            .arg(source)
            .arg("-o")
            .arg(output);
        info!(target = %self.config.target_triple, opt = %opt, "lowering to IR");
        command::run(&self.config.cxx, &mut cmd)?;
        Ok(())
    }

    fn translate(&self, ir: &Path, output: &Path, runnable: bool) -> Result<StageOutcome> {
        let tool = &self.config.translator;
        let mut cmd = Command::new(tool);
        cmd.arg(ir);
        if runnable {
            cmd.arg(&self.config.runnable_flag);
        }

        // The translator prints the module; persist it as the stage artifact.
        let captured = capture(tool, &mut cmd)?;
        if !captured.status.success() {
            return Ok(StageOutcome::Rejected(diagnostic(tool, &captured)));
        }
        fs::write(output, &captured.stdout)?;
        debug!(bytes = captured.stdout.len(), output = %output.display(), "wrote module");
        Ok(StageOutcome::Success(output.to_path_buf()))
    }

    fn assemble(&self, module: &Path, output: &Path) -> Result<StageOutcome> {
        let tool = &self.config.assembler;
        let mut cmd = Command::new(tool);
        cmd.arg(module).arg(output);
        Self::outcome(tool, &mut cmd, output)
    }

    fn link(&self, inputs: &[&Path], output: &Path) -> Result<StageOutcome> {
        let tool = &self.config.linker;
        let mut cmd = Command::new(tool);
        cmd.args(inputs).arg("-o").arg(output);
        Self::outcome(tool, &mut cmd, output)
    }

    fn run_module(&self, linked: &Path) -> Result<Option<String>> {
        let Some(vm) = &self.config.vm else {
            return Ok(None);
        };
        let output = command::run(vm, Command::new(vm).arg(linked))?;
        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }
}
