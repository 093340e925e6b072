//! Verification pipeline.
//!
//! Stages for one test case, strictly forward:
//! source → native binary → reference checksum → foreign IR → bytecode
//! module → linked module. Re-running a stage overwrites its own artifact
//! and leaves earlier ones untouched.

use std::path::PathBuf;

use smithy_case::{ArtifactLayout, CaseError, Language, Stage, TestCase, allocate_id};
use smithy_toolchain::{Diagnostic, OptimizationSpec, StageOutcome, Toolchain};
use tracing::{info, info_span, warn};

use crate::checksum::extract_checksum;
use crate::runtime::{DEFAULT_RUNTIME_ARTIFACT, DEFAULT_RUNTIME_SOURCE, RuntimeLibrary};
use crate::{Error, Result};

/// Harness configuration.
#[derive(Clone, Debug)]
pub struct HarnessConfig {
    /// Directory holding every artifact.
    pub work_dir: PathBuf,
    /// Runtime library bytecode source (relative to `work_dir` unless absolute).
    pub runtime_source: PathBuf,
    /// Built runtime library (relative to `work_dir` unless absolute).
    pub runtime_artifact: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            runtime_source: PathBuf::from(DEFAULT_RUNTIME_SOURCE),
            runtime_artifact: PathBuf::from(DEFAULT_RUNTIME_ARTIFACT),
        }
    }
}

impl HarnessConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working directory.
    #[must_use]
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    /// Set the runtime library source.
    #[must_use]
    pub fn with_runtime_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.runtime_source = path.into();
        self
    }

    /// Set the runtime library artifact path.
    #[must_use]
    pub fn with_runtime_artifact(mut self, path: impl Into<PathBuf>) -> Self {
        self.runtime_artifact = path.into();
        self
    }
}

/// Options for the composite `verify` run.
#[derive(Clone, Debug, Default)]
pub struct VerifyOptions {
    /// Optimization flags for IR lowering.
    pub opt: OptimizationSpec,
    /// Stop after translation instead of chaining into assembly.
    pub no_assemble: bool,
}

/// Steps reported to a progress callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    NativeRun,
    Lower,
    Translate,
    Assemble,
    Compare,
}

impl Step {
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::NativeRun => "Compiling and running natively",
            Self::Lower => "Lowering to IR",
            Self::Translate => "Translating to bytecode",
            Self::Assemble => "Assembling and linking",
            Self::Compare => "Checking linked module",
        }
    }
}

/// Backend checksum compared against the native reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Divergence { native: String, backend: String },
}

/// Where a `verify` run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Stopped after translation.
    Translated(PathBuf),
    /// Linked; `verdict` is set when a VM ran the module.
    Assembled {
        linked: PathBuf,
        verdict: Option<Verdict>,
    },
    /// A backend tool refused the case.
    Rejected { stage: Stage, diagnostic: Diagnostic },
}

/// Summary of a `verify` run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyReport {
    pub checksum: String,
    pub outcome: VerifyOutcome,
}

/// Runs pipeline stages against a toolchain.
pub struct Harness<T: Toolchain> {
    toolchain: T,
    layout: ArtifactLayout,
    runtime: RuntimeLibrary,
}

impl<T: Toolchain> Harness<T> {
    /// Create a harness.
    pub fn new(toolchain: T, config: HarnessConfig) -> Self {
        let layout = ArtifactLayout::new(config.work_dir);
        let runtime = RuntimeLibrary::new(
            layout.resolve(&config.runtime_source),
            layout.resolve(&config.runtime_artifact),
        );
        Self {
            toolchain,
            layout,
            runtime,
        }
    }

    #[must_use]
    pub const fn toolchain(&self) -> &T {
        &self.toolchain
    }

    #[must_use]
    pub const fn layout(&self) -> &ArtifactLayout {
        &self.layout
    }

    #[must_use]
    pub const fn runtime(&self) -> &RuntimeLibrary {
        &self.runtime
    }

    /// Open an existing test case. Its source must exist.
    ///
    /// # Errors
    /// Returns `SourceNotFound` if the source artifact is missing.
    pub fn open(&self, id: u64, lang: Language) -> Result<TestCase> {
        Ok(TestCase::open(&self.layout, id, lang)?)
    }

    /// Generate a new test case at the first free ID `>= start`.
    ///
    /// The generator seed is the ID, so an ID always reproduces the same
    /// program.
    ///
    /// # Errors
    /// Fails if the generator exits non-zero.
    pub fn generate(&self, lang: Language, start: u64) -> Result<TestCase> {
        let id = allocate_id(&self.layout, lang, start)?;
        let source = self.layout.source(id, lang);
        let _span = info_span!("generate", id).entered();

        self.toolchain.generate(lang, id, &source)?;
        info!(path = %source.display(), "generated");

        let mut case = TestCase::new(id, lang);
        case.record(Stage::Source, source);
        Ok(case)
    }

    /// Compile natively, run, and record the reference checksum.
    ///
    /// # Errors
    /// Fails if compilation fails, the binary cannot run, or it prints nothing.
    pub fn compile_and_run(&self, case: &mut TestCase) -> Result<String> {
        let source = self.source(case)?;
        let binary = self.layout.path(case.id, case.language, Stage::Binary);
        let _span = info_span!("native", id = case.id).entered();

        case.discard_from(&self.layout, Stage::Binary)?;

        self.toolchain
            .compile_native(case.language, &source, &binary)?;
        case.record(Stage::Binary, binary.clone());

        let stdout = self.toolchain.run_native(&binary)?;
        let checksum = extract_checksum(&stdout).ok_or(Error::EmptyOutput(binary))?;
        info!(checksum = %checksum, "native checksum");
        case.reference_checksum = Some(checksum.clone());
        Ok(checksum)
    }

    /// Lower the source to IR for the foreign target.
    ///
    /// # Errors
    /// Fails if the compiler exits non-zero.
    pub fn lower(&self, case: &mut TestCase, opt: &OptimizationSpec) -> Result<PathBuf> {
        let source = self.source(case)?;
        let ir = self.layout.path(case.id, case.language, Stage::Ir);
        let _span = info_span!("lower", id = case.id).entered();

        case.discard_from(&self.layout, Stage::Ir)?;

        self.toolchain
            .lower_to_ir(case.language, &source, opt, &ir)?;
        case.record(Stage::Ir, ir.clone());
        Ok(ir)
    }

    /// Translate IR to a bytecode module.
    ///
    /// Any module, object or linked artifact from an earlier run is removed
    /// first, so a rejection leaves none behind.
    ///
    /// # Errors
    /// Only fails if the IR is missing or the translator cannot be run; a
    /// translator rejection is returned as [`StageOutcome::Rejected`].
    pub fn translate(&self, case: &mut TestCase, runnable: bool) -> Result<StageOutcome> {
        let ir = self.existing(case, Stage::Ir)?;
        let module = self.layout.path(case.id, case.language, Stage::Module);
        let _span = info_span!("translate", id = case.id).entered();

        case.discard_from(&self.layout, Stage::Module)?;

        let outcome = self.toolchain.translate(&ir, &module, runnable)?;
        match &outcome {
            StageOutcome::Success(path) => case.record(Stage::Module, path.clone()),
            StageOutcome::Rejected(diag) => {
                warn!(tool = %diag.tool, exit_code = ?diag.code, "translation rejected");
            }
        }
        Ok(outcome)
    }

    /// Assemble the bytecode module and link it with the runtime library.
    ///
    /// # Errors
    /// Fails if the module is missing or the runtime library cannot be built.
    /// Assembler or linker rejection of the case is returned as
    /// [`StageOutcome::Rejected`].
    pub fn assemble(&self, case: &mut TestCase) -> Result<StageOutcome> {
        let module = self.existing(case, Stage::Module)?;
        let object = self.layout.path(case.id, case.language, Stage::Object);
        let linked = self.layout.path(case.id, case.language, Stage::Linked);
        let _span = info_span!("assemble", id = case.id).entered();

        case.discard_from(&self.layout, Stage::Object)?;
        self.runtime.ensure_built(&self.toolchain)?;

        match self.toolchain.assemble(&module, &object)? {
            StageOutcome::Success(path) => case.record(Stage::Object, path),
            rejected @ StageOutcome::Rejected(_) => return Ok(rejected),
        }

        let inputs = [object.as_path(), self.runtime.artifact()];
        let outcome = self.toolchain.link(&inputs, &linked)?;
        if let StageOutcome::Success(path) = &outcome {
            info!(path = %path.display(), "linked");
            case.record(Stage::Linked, path.clone());
        }
        Ok(outcome)
    }

    /// Run the linked module under the VM and compare with the reference.
    ///
    /// Returns `None` when no VM is configured.
    ///
    /// # Errors
    /// Fails if the case has no linked module or no reference checksum, or
    /// the VM cannot run.
    pub fn compare(&self, case: &TestCase) -> Result<Option<Verdict>> {
        let linked = self.existing(case, Stage::Linked)?;
        let Some(native) = case.reference_checksum.clone() else {
            return Err(Error::NoReferenceChecksum(case.id));
        };
        let Some(stdout) = self.toolchain.run_module(&linked)? else {
            return Ok(None);
        };
        let backend = extract_checksum(&stdout).ok_or(Error::EmptyOutput(linked))?;

        if backend == native {
            info!(id = case.id, "checksums match");
            Ok(Some(Verdict::Match))
        } else {
            warn!(id = case.id, native = %native, backend = %backend, "divergence");
            Ok(Some(Verdict::Divergence { native, backend }))
        }
    }

    /// Run native verification, lowering and translation, then chain into
    /// assembly unless disabled.
    ///
    /// # Errors
    /// Fatal stage failures are returned as errors. Backend rejection ends
    /// the run with [`VerifyOutcome::Rejected`].
    pub fn verify(&self, case: &mut TestCase, options: &VerifyOptions) -> Result<VerifyReport> {
        self.verify_with_progress(case, options, |_| {})
    }

    /// Like [`Self::verify`], calling `progress` as each step starts.
    ///
    /// # Errors
    /// See [`Self::verify`].
    pub fn verify_with_progress(
        &self,
        case: &mut TestCase,
        options: &VerifyOptions,
        mut progress: impl FnMut(Step),
    ) -> Result<VerifyReport> {
        progress(Step::NativeRun);
        let checksum = self.compile_and_run(case)?;

        progress(Step::Lower);
        self.lower(case, &options.opt)?;

        progress(Step::Translate);
        let module = match self.translate(case, !options.no_assemble)? {
            StageOutcome::Success(path) => path,
            StageOutcome::Rejected(diagnostic) => {
                return Ok(Self::rejected(checksum, Stage::Module, diagnostic));
            }
        };
        if options.no_assemble {
            return Ok(VerifyReport {
                checksum,
                outcome: VerifyOutcome::Translated(module),
            });
        }

        progress(Step::Assemble);
        let linked = match self.assemble(case)? {
            StageOutcome::Success(path) => path,
            StageOutcome::Rejected(diagnostic) => {
                // The object is only recorded once the assembler accepted the module.
                let stage = if case.artifact(Stage::Object).is_some() {
                    Stage::Linked
                } else {
                    Stage::Object
                };
                return Ok(Self::rejected(checksum, stage, diagnostic));
            }
        };

        progress(Step::Compare);
        let verdict = self.compare(case)?;
        Ok(VerifyReport {
            checksum,
            outcome: VerifyOutcome::Assembled { linked, verdict },
        })
    }

    const fn rejected(checksum: String, stage: Stage, diagnostic: Diagnostic) -> VerifyReport {
        VerifyReport {
            checksum,
            outcome: VerifyOutcome::Rejected { stage, diagnostic },
        }
    }

    fn source(&self, case: &TestCase) -> Result<PathBuf> {
        let source = self.layout.source(case.id, case.language);
        if !source.try_exists()? {
            return Err(CaseError::SourceNotFound(source).into());
        }
        Ok(source)
    }

    /// Path of a stage artifact that must already exist on disk.
    fn existing(&self, case: &TestCase, stage: Stage) -> Result<PathBuf> {
        let path = self.layout.path(case.id, case.language, stage);
        if !path.try_exists()? {
            return Err(Error::MissingArtifact { stage, path });
        }
        Ok(path)
    }
}
