//! Shared runtime library cache.
//!
//! Every linked test case includes the runtime support module. It is built
//! once from its bytecode source and then trusted as-is: if the artifact
//! exists on disk it is never rebuilt or invalidated.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use smithy_toolchain::{StageOutcome, Toolchain};
use tracing::{debug, info};

use crate::{Error, Result};

/// Default runtime library source, relative to the working directory.
pub const DEFAULT_RUNTIME_SOURCE: &str = "libll2w.wasm";
/// Default runtime library artifact, relative to the working directory.
pub const DEFAULT_RUNTIME_ARTIFACT: &str = "libll2w.why";

/// How [`RuntimeLibrary::ensure_built`] satisfied the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimeStatus {
    /// The artifact already existed.
    Cached,
    /// The artifact was assembled by this call.
    Built,
}

/// Memoized build of the runtime support module, keyed by a fixed path.
#[derive(Debug)]
pub struct RuntimeLibrary {
    source: PathBuf,
    artifact: PathBuf,
    ready: OnceCell<()>,
}

impl RuntimeLibrary {
    pub fn new(source: impl Into<PathBuf>, artifact: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            artifact: artifact.into(),
            ready: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    #[must_use]
    pub fn artifact(&self) -> &Path {
        &self.artifact
    }

    /// Make sure the runtime artifact exists, assembling it if missing.
    ///
    /// # Errors
    /// Fails if the source is missing or the assembler cannot build it.
    /// A runtime that does not assemble is a broken install, not a backend
    /// bug, so a rejection here is fatal.
    pub fn ensure_built<T: Toolchain>(&self, toolchain: &T) -> Result<RuntimeStatus> {
        if self.ready.get().is_some() {
            return Ok(RuntimeStatus::Cached);
        }
        if self.artifact.try_exists()? {
            debug!(path = %self.artifact.display(), "runtime library cached");
            self.mark_ready();
            return Ok(RuntimeStatus::Cached);
        }
        if !self.source.try_exists()? {
            return Err(Error::RuntimeSourceNotFound(self.source.clone()));
        }

        info!(source = %self.source.display(), "building runtime library");
        match toolchain.assemble(&self.source, &self.artifact)? {
            StageOutcome::Success(path) => {
                info!(path = %path.display(), "runtime library built");
                self.mark_ready();
                Ok(RuntimeStatus::Built)
            }
            StageOutcome::Rejected(diagnostic) => Err(Error::RuntimeBuildRejected(diagnostic)),
        }
    }

    fn mark_ready(&self) {
        let _ = self.ready.set(());
    }
}
