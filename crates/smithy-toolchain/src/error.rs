use thiserror::Error;

/// External tool errors.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} failed (exit code {}): {}", exit_label(.code), first_line(.stderr))]
    Failed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },
}

pub type Result<T> = std::result::Result<T, ToolError>;

#[allow(clippy::ref_option)]
fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("unknown error")
}
