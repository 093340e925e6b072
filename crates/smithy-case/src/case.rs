//! The test case entity.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{ArtifactLayout, CaseError, Language, PipelineState, Result, Stage};

/// One generated program and the artifacts produced for it so far.
///
/// A missing key in `artifacts` means that stage has not run for this ID.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    pub id: u64,
    pub language: Language,
    pub artifacts: BTreeMap<Stage, PathBuf>,
    /// Set once the native run succeeds.
    pub reference_checksum: Option<String>,
}

impl TestCase {
    /// Create a test case with no artifacts recorded.
    #[must_use]
    pub const fn new(id: u64, language: Language) -> Self {
        Self {
            id,
            language,
            artifacts: BTreeMap::new(),
            reference_checksum: None,
        }
    }

    /// Open an existing test case, requiring its source artifact.
    ///
    /// # Errors
    /// Returns `SourceNotFound` if `{id}.{ext}` does not exist.
    pub fn open(layout: &ArtifactLayout, id: u64, language: Language) -> Result<Self> {
        let source = layout.source(id, language);
        if !source.try_exists()? {
            return Err(CaseError::SourceNotFound(source));
        }
        let mut case = Self::new(id, language);
        case.record(Stage::Source, source);
        Ok(case)
    }

    /// Open an existing test case and record every stage artifact on disk.
    ///
    /// # Errors
    /// Returns `SourceNotFound` if the source is missing, or an IO error.
    pub fn discover(layout: &ArtifactLayout, id: u64, language: Language) -> Result<Self> {
        let mut case = Self::open(layout, id, language)?;
        for stage in Stage::ALL {
            let path = layout.path(id, language, stage);
            if path.try_exists()? {
                case.record(stage, path);
            }
        }
        Ok(case)
    }

    /// Record the artifact produced by `stage`.
    pub fn record(&mut self, stage: Stage, path: PathBuf) {
        self.artifacts.insert(stage, path);
    }

    /// Delete the artifacts of `stage` and every later stage.
    ///
    /// Run before a stage re-runs, so no output of an earlier run survives
    /// downstream of it. Missing files are skipped.
    ///
    /// # Errors
    /// Returns an IO error if an existing artifact cannot be removed.
    pub fn discard_from(&mut self, layout: &ArtifactLayout, stage: Stage) -> Result<()> {
        for later in Stage::ALL.into_iter().filter(|&s| s >= stage) {
            let path = layout.path(self.id, self.language, later);
            match fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "removed stale artifact"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            self.artifacts.remove(&later);
        }
        if stage <= Stage::Binary {
            self.reference_checksum = None;
        }
        Ok(())
    }

    /// Path of a stage artifact, if that stage has run.
    #[must_use]
    pub fn artifact(&self, stage: Stage) -> Option<&Path> {
        self.artifacts.get(&stage).map(PathBuf::as_path)
    }

    /// Furthest pipeline state reached, judged by recorded artifacts.
    #[must_use]
    pub fn state(&self) -> Option<PipelineState> {
        self.artifacts
            .keys()
            .filter_map(|&stage| PipelineState::reached_by(stage))
            .max()
    }
}
