//! Artifact naming.
//!
//! Each stage writes `{id}.{ext}` into the working directory. The external
//! tools expect these exact extensions, so the mapping here is fixed.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::Language;

/// Stage artifact kinds, in pipeline order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Generated source program.
    Source,
    /// Natively compiled binary.
    Binary,
    /// Textual LLVM IR for the foreign target.
    Ir,
    /// Bytecode module emitted by the translator.
    Module,
    /// Assembled, not yet linked module.
    Object,
    /// Final module linked against the runtime library.
    Linked,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Self; 6] = [
        Self::Source,
        Self::Binary,
        Self::Ir,
        Self::Module,
        Self::Object,
        Self::Linked,
    ];

    /// File extension for this stage. Only the source depends on the language.
    #[must_use]
    pub const fn extension(self, lang: Language) -> &'static str {
        match self {
            Self::Source => lang.extension(),
            Self::Binary => "bin",
            Self::Ir => "ll",
            Self::Module => "wasm",
            Self::Object => "o",
            Self::Linked => "why",
        }
    }

    /// Short name used in logs and status output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Binary => "binary",
            Self::Ir => "ir",
            Self::Module => "module",
            Self::Object => "object",
            Self::Linked => "linked",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pipeline state reached by a test case.
///
/// Transitions are strictly forward: `Generated → NativeVerified → IrLowered
/// → Translated → Assembled`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineState {
    Generated,
    NativeVerified,
    IrLowered,
    Translated,
    Assembled,
}

impl PipelineState {
    /// State reached once the artifact for `stage` exists.
    ///
    /// The intermediate object does not complete a state on its own.
    #[must_use]
    pub const fn reached_by(stage: Stage) -> Option<Self> {
        match stage {
            Stage::Source => Some(Self::Generated),
            Stage::Binary => Some(Self::NativeVerified),
            Stage::Ir => Some(Self::IrLowered),
            Stage::Module => Some(Self::Translated),
            Stage::Object => None,
            Stage::Linked => Some(Self::Assembled),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::NativeVerified => "native-verified",
            Self::IrLowered => "ir-lowered",
            Self::Translated => "translated",
            Self::Assembled => "assembled",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps `(id, stage)` to a path inside the working directory.
#[derive(Clone, Debug)]
pub struct ArtifactLayout {
    dir: PathBuf,
}

impl ArtifactLayout {
    /// Create a layout rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Working directory all artifacts live in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name (without directory) of an artifact.
    #[must_use]
    pub fn file_name(id: u64, lang: Language, stage: Stage) -> String {
        format!("{id}.{}", stage.extension(lang))
    }

    /// Full path of an artifact.
    #[must_use]
    pub fn path(&self, id: u64, lang: Language, stage: Stage) -> PathBuf {
        self.dir.join(Self::file_name(id, lang, stage))
    }

    /// Path of the source artifact.
    #[must_use]
    pub fn source(&self, id: u64, lang: Language) -> PathBuf {
        self.path(id, lang, Stage::Source)
    }

    /// Resolve a possibly relative path against the working directory.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }
}

impl Default for ArtifactLayout {
    fn default() -> Self {
        Self::new(".")
    }
}
