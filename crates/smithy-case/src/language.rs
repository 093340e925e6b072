//! Source languages the generator can emit.

use std::fmt;
use std::str::FromStr;

use crate::CaseError;

/// Source language of a generated test case.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    C,
    #[default]
    Cpp,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Self; 2] = [Self::C, Self::Cpp];

    /// File extension of source artifacts in this language.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "cpp",
        }
    }
}

impl FromStr for Language {
    type Err = CaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.extension() == s)
            .ok_or_else(|| CaseError::InvalidLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language() {
        assert_eq!("c".parse::<Language>().unwrap(), Language::C);
        assert_eq!("cpp".parse::<Language>().unwrap(), Language::Cpp);
    }

    #[test]
    fn test_invalid_language() {
        let err = "rust".parse::<Language>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid language: rust");
    }

    #[test]
    fn test_default_is_cpp() {
        assert_eq!(Language::default(), Language::Cpp);
    }
}
