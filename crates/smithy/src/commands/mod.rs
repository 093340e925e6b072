//! Command implementations.
//!
//! Each submodule handles one CLI command.

mod assemble;
mod generate;
mod status;
mod verify;

use smithy::{Harness, HarnessConfig, SystemToolchain, ToolchainConfig};

use crate::cli::{Cli, Commands, ToolArgs};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    let harness = build_harness(&cli.tools);
    match &cli.command {
        Commands::Generate { lang, id } => {
            generate::cmd_generate(&harness, (*lang).into(), id.unwrap_or(0))
        }
        Commands::Verify {
            id,
            lang,
            optimization,
            levels,
            no_assemble,
        } => verify::cmd_verify(
            &harness,
            *id,
            (*lang).into(),
            optimization.as_deref(),
            &levels.selected(),
            *no_assemble,
        ),
        Commands::Assemble { id, lang } => assemble::cmd_assemble(&harness, *id, (*lang).into()),
        Commands::Status { id, lang } => status::cmd_status(&harness, *id, (*lang).into()),
    }
}

fn build_harness(tools: &ToolArgs) -> Harness<SystemToolchain> {
    let toolchain = ToolchainConfig::new()
        .with_generator(&tools.csmith)
        .with_cxx(&tools.cc)
        .with_target_triple(&tools.target)
        .with_translator(&tools.translator)
        .with_assembler(&tools.assembler)
        .with_linker(&tools.linker)
        .with_vm(tools.vm.clone());
    let config = HarnessConfig::new()
        .with_work_dir(&tools.dir)
        .with_runtime_source(&tools.runtime_source)
        .with_runtime_artifact(&tools.runtime);
    Harness::new(SystemToolchain::new(toolchain), config)
}
