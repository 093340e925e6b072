//! Generate command.

use smithy::{Harness, Language, Stage, SystemToolchain};
use tracing::error;

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal::{self, Spinner};

/// Handle the `generate` command.
pub fn cmd_generate(harness: &Harness<SystemToolchain>, lang: Language, start: u64) -> i32 {
    let spinner = Spinner::new(format!("Generating {lang} test case"));
    match harness.generate(lang, start) {
        Ok(case) => {
            let name = case
                .artifact(Stage::Source)
                .and_then(|p| p.file_name())
                .map_or_else(|| case.id.to_string(), |n| n.to_string_lossy().into_owned());
            spinner.finish_with_success(&format!("Generated {name}"));
            EXIT_SUCCESS
        }
        Err(e) => {
            spinner.finish_with_failure("Generation failed");
            error!(error = %e, "generate failed");
            terminal::error(&e.to_string());
            EXIT_FAILURE
        }
    }
}
