//! Verify command.

use smithy::{
    Harness, Language, OptLevel, OptimizationSpec, Step, SystemToolchain, Verdict,
    VerifyOptions, VerifyOutcome,
};
use tracing::error;

use crate::cli::{EXIT_DIVERGENCE, EXIT_FAILURE, EXIT_REJECTED, EXIT_SUCCESS};
use crate::terminal::{self, Spinner, StepTracker};

/// Handle the `verify` command.
pub fn cmd_verify(
    harness: &Harness<SystemToolchain>,
    id: u64,
    lang: Language,
    optimization: Option<&str>,
    levels: &[OptLevel],
    no_assemble: bool,
) -> i32 {
    let mut case = match harness.open(id, lang) {
        Ok(case) => case,
        Err(e) => {
            terminal::error(&e.to_string());
            return EXIT_FAILURE;
        }
    };

    let options = VerifyOptions {
        opt: OptimizationSpec::resolve(optimization, levels),
        no_assemble,
    };
    terminal::info(&format!("Verifying {id}.{lang} with {}", options.opt));

    let total = if no_assemble { 3 } else { 5 };
    let mut tracker = StepTracker::new(total);
    let mut running: Option<(Spinner, String)> = None;

    let result = harness.verify_with_progress(&mut case, &options, |step: Step| {
        if let Some((spinner, label)) = running.take() {
            spinner.finish_with_success(&label);
        }
        running = Some(tracker.step(step.description()));
    });

    match result {
        Ok(report) => {
            if let Some((spinner, label)) = running.take() {
                if matches!(report.outcome, VerifyOutcome::Rejected { .. }) {
                    spinner.finish_with_failure(&label);
                } else {
                    spinner.finish_with_success(&label);
                }
            }
            terminal::checksum(&report.checksum);
            report_outcome(&report.outcome)
        }
        Err(e) => {
            if let Some((spinner, label)) = running.take() {
                spinner.finish_with_failure(&label);
            }
            if let Some(checksum) = &case.reference_checksum {
                terminal::checksum(checksum);
            }
            error!(id, error = %e, "verify failed");
            terminal::error(&e.to_string());
            EXIT_FAILURE
        }
    }
}

fn report_outcome(outcome: &VerifyOutcome) -> i32 {
    match outcome {
        VerifyOutcome::Translated(module) => {
            terminal::success("Translated");
            terminal::path_output(module);
            EXIT_SUCCESS
        }
        VerifyOutcome::Assembled { linked, verdict } => {
            terminal::success("Assembled");
            terminal::path_output(linked);
            match verdict {
                None | Some(Verdict::Match) => {
                    if verdict.is_some() {
                        terminal::success("Backend checksum matches");
                    }
                    EXIT_SUCCESS
                }
                Some(Verdict::Divergence { native, backend }) => {
                    terminal::error(&format!(
                        "Divergence: native {native}, backend {backend}"
                    ));
                    EXIT_DIVERGENCE
                }
            }
        }
        VerifyOutcome::Rejected { stage, diagnostic } => {
            terminal::warning(&format!("Backend rejected the test case at the {stage} stage"));
            terminal::diagnostic(diagnostic);
            EXIT_REJECTED
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use smithy::{Diagnostic, Stage};

    use super::*;

    fn assembled(verdict: Option<Verdict>) -> VerifyOutcome {
        VerifyOutcome::Assembled {
            linked: PathBuf::from("0.why"),
            verdict,
        }
    }

    #[test]
    fn test_rejection_exit_code() {
        let outcome = VerifyOutcome::Rejected {
            stage: Stage::Module,
            diagnostic: Diagnostic::new("ll2w", Some(1), "Unsupported instruction: callbr"),
        };
        assert_eq!(report_outcome(&outcome), EXIT_REJECTED);
        assert_ne!(EXIT_REJECTED, EXIT_SUCCESS);
    }

    #[test]
    fn test_divergence_exit_code() {
        let outcome = assembled(Some(Verdict::Divergence {
            native: "0x1234".to_string(),
            backend: "0x9999".to_string(),
        }));
        assert_eq!(report_outcome(&outcome), EXIT_DIVERGENCE);
    }

    #[test]
    fn test_success_exit_codes() {
        let translated = VerifyOutcome::Translated(PathBuf::from("0.wasm"));
        assert_eq!(report_outcome(&translated), EXIT_SUCCESS);
        assert_eq!(report_outcome(&assembled(None)), EXIT_SUCCESS);
        assert_eq!(report_outcome(&assembled(Some(Verdict::Match))), EXIT_SUCCESS);
    }

    #[test]
    fn test_exit_codes_distinct() {
        let codes = [EXIT_SUCCESS, EXIT_FAILURE, EXIT_REJECTED, EXIT_DIVERGENCE];
        for (i, a) in codes.iter().enumerate() {
            assert!(codes[i + 1..].iter().all(|b| a != b));
        }
        // Clap reports usage errors with 2.
        assert!(!codes.contains(&2));
    }
}
