//! Status command.

use smithy::{Harness, Language, SystemToolchain, TestCase};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal;

/// Handle the `status` command.
pub fn cmd_status(harness: &Harness<SystemToolchain>, id: u64, lang: Language) -> i32 {
    let case = match TestCase::discover(harness.layout(), id, lang) {
        Ok(case) => case,
        Err(e) => {
            terminal::error(&e.to_string());
            return EXIT_FAILURE;
        }
    };

    let state = case.state().map_or("unknown", |s| s.name());
    println!("{id}.{lang}: {state}");
    for (stage, path) in &case.artifacts {
        println!("  {:<8} {}", stage.name(), path.display());
    }
    if !harness.runtime().artifact().exists() {
        terminal::warning("runtime library not built yet");
    }
    EXIT_SUCCESS
}
