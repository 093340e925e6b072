//! Reference checksum extraction.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

static CHECKSUM_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

/// Extract the checksum from a program's stdout.
///
/// Generated programs print a single `checksum = <value>` line. Without one,
/// the whole trimmed output serves as the checksum. Returns `None` for empty
/// output or an empty checksum value.
#[must_use]
pub fn extract_checksum(output: &str) -> Option<String> {
    let pattern = CHECKSUM_PATTERN.get_or_init(|| Regex::new(r"(?m)^checksum = (.*)$").ok());

    if let Some(caps) = pattern.as_ref().and_then(|p| p.captures(output)) {
        let value = caps[1].trim();
        return (!value.is_empty()).then(|| value.to_string());
    }

    let trimmed = output.trim();
    if trimmed.is_empty() {
        return None;
    }
    warn!(output = trimmed, "no checksum line, using whole output");
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_checksum() {
        assert_eq!(extract_checksum("checksum = 0x1234\n").as_deref(), Some("0x1234"));
    }

    #[test]
    fn test_extract_checksum_csmith_format() {
        assert_eq!(
            extract_checksum("checksum = 5D8B0AC3\r\n").as_deref(),
            Some("5D8B0AC3")
        );
    }

    #[test]
    fn test_extract_among_other_lines() {
        let output = "...checksum after hashing g_2 : 1\nchecksum = 2A\nbye\n";
        assert_eq!(extract_checksum(output).as_deref(), Some("2A"));
    }

    #[test]
    fn test_fallback_to_whole_output() {
        assert_eq!(extract_checksum("  42\n").as_deref(), Some("42"));
    }

    #[test]
    fn test_empty_checksum_value() {
        assert_eq!(extract_checksum("checksum = \n"), None);
        assert_eq!(extract_checksum("checksum =  \t\nmore\n"), None);
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(extract_checksum(""), None);
        assert_eq!(extract_checksum(" \n\t"), None);
    }
}
