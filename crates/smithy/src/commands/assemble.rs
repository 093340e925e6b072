//! Assemble command.

use smithy::{Harness, Language, StageOutcome, SystemToolchain, TestCase};
use tracing::error;

use crate::cli::{EXIT_FAILURE, EXIT_REJECTED, EXIT_SUCCESS};
use crate::terminal::{self, Spinner};

/// Handle the `assemble` command.
pub fn cmd_assemble(harness: &Harness<SystemToolchain>, id: u64, lang: Language) -> i32 {
    let mut case = TestCase::new(id, lang);
    let spinner = Spinner::new(format!("Assembling {id}"));

    match harness.assemble(&mut case) {
        Ok(StageOutcome::Success(path)) => {
            spinner.finish_with_success(&format!("Assembled {id}"));
            terminal::path_output(&path);
            EXIT_SUCCESS
        }
        Ok(StageOutcome::Rejected(diag)) => {
            spinner.finish_with_failure(&format!("Assembly of {id} rejected"));
            terminal::diagnostic(&diag);
            EXIT_REJECTED
        }
        Err(e) => {
            spinner.finish_with_failure("Assembly failed");
            error!(id, error = %e, "assemble failed");
            terminal::error(&e.to_string());
            EXIT_FAILURE
        }
    }
}
