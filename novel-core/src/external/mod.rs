// ============================================================================
// novel-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with External Conversion Programs
//
// This module encapsulates every interaction with the external command-line
// tools the builds are made of (pandoc, weasyprint, pdfunite, lualatex). It
// provides a trait for running a conversion stage and a concrete
// implementation backed by std::process, so the pipelines can be driven by a
// recording mock in tests.
//
// KEY COMPONENTS:
// - Stage: one immutable external command invocation
// - StageOutcome: success flag plus captured combined output
// - CommandRunner: trait for running a stage
// - SystemRunner: production implementation (see runner.rs)
// - MockRunner: recording test implementation (see mocks.rs)
//
// AI-ASSISTANT-INFO: External tool abstractions for the build pipelines

// ---- Internal crate imports ----
use crate::build_log::BuildLog;
use crate::error::CoreResult;

// ---- Standard library imports ----
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Production command runner using std::process
pub mod runner;

/// Recording runner with scripted outcomes, for tests
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use runner::SystemRunner;

// ============================================================================
// STAGE
// ============================================================================

/// A single external command invocation within a build.
///
/// A stage is built once per run and not modified afterwards. Besides the
/// program and its ordered arguments it records the files it reads and
/// writes, which lets test runners fabricate outputs and keeps the data
/// dependencies of a pipeline visible.
///
/// # Examples
///
/// ```rust
/// use novel_core::external::Stage;
///
/// let stage = Stage::new("merge-pdf", "pdfunite")
///     .input_arg("front.pdf")
///     .input_arg("text.pdf")
///     .output_arg("book.pdf");
///
/// assert_eq!(stage.command_line(), "pdfunite front.pdf text.pdf book.pdf");
/// assert_eq!(stage.outputs().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    name: String,
    program: String,
    args: Vec<OsString>,
    inputs: Vec<PathBuf>,
    outputs: Vec<PathBuf>,
}

impl Stage {
    pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Appends a plain argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several plain arguments in order.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Appends a path argument that the command reads.
    #[must_use]
    pub fn input_arg(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.args.push(path.as_os_str().to_os_string());
        self.inputs.push(path.to_path_buf());
        self
    }

    /// Appends a path argument that the command writes.
    #[must_use]
    pub fn output_arg(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.args.push(path.as_os_str().to_os_string());
        self.outputs.push(path.to_path_buf());
        self
    }

    /// Declares an input that is passed inside another argument
    /// (e.g. `--metadata-file=<path>`).
    #[must_use]
    pub fn reads(mut self, path: impl AsRef<Path>) -> Self {
        self.inputs.push(path.as_ref().to_path_buf());
        self
    }

    /// Declares an output that the command writes without it appearing as a
    /// standalone argument.
    #[must_use]
    pub fn writes(mut self, path: impl AsRef<Path>) -> Self {
        self.outputs.push(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    #[must_use]
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    #[must_use]
    pub fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }

    /// Program and arguments joined by spaces, for logs and messages.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(OsStr::new(&self.program))
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ============================================================================
// STAGE OUTCOME
// ============================================================================

/// Result of running a stage to completion.
///
/// A nonzero exit status is an ordinary failed outcome; it is never turned
/// into an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
    /// True when the process exited with status 0
    pub success: bool,
    /// Exit code, if the process exited normally
    pub exit_code: Option<i32>,
    /// Combined stdout/stderr lines in arrival order
    pub output: String,
}

impl StageOutcome {
    #[must_use]
    pub fn succeeded(output: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            output: output.into(),
        }
    }

    #[must_use]
    pub fn failed(exit_code: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code,
            output: output.into(),
        }
    }
}

// ============================================================================
// COMMAND RUNNER
// ============================================================================

/// Runs stages and reports their outcome.
///
/// Implementations stream the process output into `log` and only return an
/// error when the process could not be started at all. Runners are shared
/// between concurrently running pipeline branches, hence `Sync`.
pub trait CommandRunner: Sync {
    fn run(&self, stage: &Stage, log: &BuildLog) -> CoreResult<StageOutcome>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, stage: &Stage, log: &BuildLog) -> CoreResult<StageOutcome> {
        (**self).run(stage, log)
    }
}
