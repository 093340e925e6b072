//! Optimization level selection for IR lowering.

use std::fmt;

/// Named optimization levels, lowest to highest aggressiveness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum OptLevel {
    #[default]
    O0,
    O1,
    O2,
    O3,
    Ofast,
}

impl OptLevel {
    /// Levels in scan order.
    pub const ALL: [Self; 5] = [Self::O0, Self::O1, Self::O2, Self::O3, Self::Ofast];

    /// Compiler flag for this level.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::O0 => "-O0",
            Self::O1 => "-O1",
            Self::O2 => "-O2",
            Self::O3 => "-O3",
            Self::Ofast => "-Ofast",
        }
    }
}

impl fmt::Display for OptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// Ordered optimization flags passed to IR lowering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptimizationSpec {
    flags: Vec<String>,
}

impl OptimizationSpec {
    /// Resolve the flag set from an explicit override or the selected levels.
    ///
    /// An explicit string wins and is split on whitespace verbatim. Otherwise
    /// the lowest selected level is used, falling back to `-O0`. The two
    /// sources are never merged.
    #[must_use]
    pub fn resolve(explicit: Option<&str>, selected: &[OptLevel]) -> Self {
        if let Some(explicit) = explicit {
            return Self::from_flags(explicit.split_whitespace());
        }
        let level = OptLevel::ALL
            .into_iter()
            .find(|level| selected.contains(level))
            .unwrap_or_default();
        Self::level(level)
    }

    /// Single-flag spec for a named level.
    #[must_use]
    pub fn level(level: OptLevel) -> Self {
        Self {
            flags: vec![level.flag().to_string()],
        }
    }

    /// Spec from explicit flag tokens.
    pub fn from_flags<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flags: flags.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn flags(&self) -> &[String] {
        &self.flags
    }
}

impl Default for OptimizationSpec {
    fn default() -> Self {
        Self::level(OptLevel::default())
    }
}

impl fmt::Display for OptimizationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flags.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_override_wins() {
        let spec = OptimizationSpec::resolve(Some("-O2 -foo"), &[OptLevel::O3]);
        assert_eq!(spec.flags(), ["-O2", "-foo"]);
    }

    #[test]
    fn test_explicit_trims_whitespace_runs() {
        let spec = OptimizationSpec::resolve(Some("  -O1\t -fno-inline  "), &[]);
        assert_eq!(spec.flags(), ["-O1", "-fno-inline"]);
    }

    #[test]
    fn test_named_level() {
        let spec = OptimizationSpec::resolve(None, &[OptLevel::O1]);
        assert_eq!(spec.flags(), ["-O1"]);
    }

    #[test]
    fn test_lowest_selected_level_wins() {
        let spec = OptimizationSpec::resolve(None, &[OptLevel::Ofast, OptLevel::O2]);
        assert_eq!(spec.flags(), ["-O2"]);
    }

    #[test]
    fn test_default_o0() {
        assert_eq!(OptimizationSpec::resolve(None, &[]).flags(), ["-O0"]);
        assert_eq!(OptimizationSpec::default().to_string(), "-O0");
    }
}
