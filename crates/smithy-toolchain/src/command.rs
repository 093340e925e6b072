//! Process spawning with captured output.

use std::path::{Component, Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::{debug, error, info_span};

use crate::{Diagnostic, Result, ToolError};

/// Run `cmd` to completion with stdout and stderr captured.
pub fn capture(tool: &str, cmd: &mut Command) -> Result<Output> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    debug!(command = ?cmd, "spawning");

    let _span = info_span!("tool", tool = tool).entered();
    cmd.output().map_err(|source| {
        error!(tool = tool, error = %source, "failed to spawn");
        ToolError::Spawn {
            tool: tool.to_string(),
            source,
        }
    })
}

/// Run `cmd`, treating a non-zero exit as fatal.
pub fn run(tool: &str, cmd: &mut Command) -> Result<Output> {
    let output = capture(tool, cmd)?;
    if output.status.success() {
        return Ok(output);
    }

    let code = output.status.code();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if stderr.is_empty() {
        error!(tool = tool, exit_code = ?code, "tool failed");
    } else {
        error!(tool = tool, exit_code = ?code, stderr = %stderr, "tool failed");
    }
    Err(ToolError::Failed {
        tool: tool.to_string(),
        code,
        stderr,
    })
}

/// Diagnostic for a tool that exited non-zero. Tools differ in which stream
/// they report on, so both are kept, stderr first.
pub fn diagnostic(tool: &str, output: &Output) -> Diagnostic {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let text = match (stderr.trim().is_empty(), stdout.trim().is_empty()) {
        (false, false) => format!("{}\n{}", stderr.trim_end(), stdout.trim_end()),
        (false, true) => stderr.trim_end().to_string(),
        (true, _) => stdout.trim_end().to_string(),
    };
    Diagnostic::new(tool, output.status.code(), text)
}

/// Path suitable for executing directly. A bare file name would be looked up
/// in `PATH`, so it gets a `./` prefix.
pub fn executable_path(path: &Path) -> PathBuf {
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Path::new(".").join(path),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executable_path() {
        assert_eq!(executable_path(Path::new("0.bin")), Path::new("./0.bin"));
        assert_eq!(executable_path(Path::new("./0.bin")), Path::new("./0.bin"));
        assert_eq!(executable_path(Path::new("work/0.bin")), Path::new("work/0.bin"));
        assert_eq!(executable_path(Path::new("/tmp/0.bin")), Path::new("/tmp/0.bin"));
    }

    #[test]
    fn test_spawn_missing_tool() {
        let mut cmd = Command::new("smithy-definitely-not-a-tool");
        let err = capture("smithy-definitely-not-a-tool", &mut cmd).unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_nonzero_is_failure() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo boom >&2; exit 3"]);
        let err = run("sh", &mut cmd).unwrap_err();
        match err {
            ToolError::Failed { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr.trim(), "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_diagnostic_keeps_both_streams() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo out; echo err >&2; exit 1"]);
        let output = capture("sh", &mut cmd).unwrap();
        let diag = diagnostic("sh", &output);
        assert_eq!(diag.code, Some(1));
        assert_eq!(diag.text, "err\nout");
    }
}
