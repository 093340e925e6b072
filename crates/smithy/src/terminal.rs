//! Terminal UI utilities for progress indication and styled output.
//!
//! Provides spinners and styled output helpers for CLI commands.

use std::borrow::Cow;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use smithy::Diagnostic;

/// Spinner for a running external tool.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Create a new spinner with a message.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.cyan} {msg}")
        {
            bar.set_style(spinner_style);
        }
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    /// Finish the spinner with a success message.
    pub fn finish_with_success(&self, message: &str) {
        self.bar.finish_and_clear();
        success(message);
    }

    /// Finish the spinner with a failure message.
    pub fn finish_with_failure(&self, message: &str) {
        self.bar.finish_and_clear();
        error(message);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Track progress through the pipeline steps.
pub struct StepTracker {
    current: usize,
    total: usize,
}

impl StepTracker {
    pub const fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    /// Start the next step, returning its spinner and label.
    pub fn step(&mut self, message: &str) -> (Spinner, String) {
        self.current += 1;
        let label = format!("[{}/{}] {}", self.current, self.total, message);
        (Spinner::new(label.clone()), label)
    }
}

// ============================================================================
// Styled output helpers
// ============================================================================

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", style("→").cyan(), message);
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), message);
}

/// Print a path output (like "-> /path/to/file").
pub fn path_output(path: &std::path::Path) {
    eprintln!("  {} {}", style("→").dim(), style(path.display()).dim());
}

/// Print the reference checksum to stdout.
pub fn checksum(value: &str) {
    println!("Native checksum: {}", style(value).green());
}

/// Print a tool diagnostic verbatim, indented under a header.
pub fn diagnostic(diag: &Diagnostic) {
    let text = diag.to_string();
    let mut lines = text.lines();
    if let Some(header) = lines.next() {
        error(header);
    }
    for line in lines {
        eprintln!("  {}", style(line).dim());
    }
}
