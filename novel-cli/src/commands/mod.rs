//! Command implementations for the CLI.
//!
//! Each submodule implements one command verb; [`dispatch`] routes a parsed
//! [`Command`] to it.

/// Format builds: `paperback`, `epub`, `manuscript`, `all`.
pub mod build;
pub mod clean;
/// Interactive project setup.
pub mod init;
pub mod wc;

use crate::cli::Command;
use crate::error::CliResult;
use novel_core::{BuildLog, BuildTarget, CommandRunner, ProjectLayout};

impl Command {
    /// Whether the command runs external tools and writes the build log.
    #[must_use]
    pub fn builds(self) -> bool {
        matches!(
            self,
            Self::All | Self::Paperback | Self::Epub | Self::Manuscript
        )
    }
}

/// Runs `command` against the project at `layout`.
pub fn dispatch<R: CommandRunner + ?Sized>(
    command: Command,
    runner: &R,
    layout: &ProjectLayout,
) -> CliResult<()> {
    match command {
        Command::Init => init::run(layout),
        Command::Clean => clean::run(layout),
        Command::Wc => wc::run(layout).map(|_| ()),
        Command::All | Command::Paperback | Command::Epub | Command::Manuscript => {
            let log = BuildLog::open(layout.log_file())?;
            match command {
                Command::Paperback => {
                    build::run_target(BuildTarget::Paperback, runner, layout, &log)?;
                }
                Command::Epub => {
                    build::run_target(BuildTarget::Epub, runner, layout, &log)?;
                }
                Command::Manuscript => {
                    build::run_target(BuildTarget::Manuscript, runner, layout, &log)?;
                }
                _ => {
                    build::run_all(runner, layout, &log)?;
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novel_core::CoreError;
    use novel_core::external::mocks::MockRunner;
    use std::fs;

    #[test]
    fn test_builds_classification() {
        assert!(Command::All.builds());
        assert!(Command::Manuscript.builds());
        assert!(!Command::Wc.builds());
        assert!(!Command::Clean.builds());
        assert!(!Command::Init.builds());
    }

    #[test]
    fn test_dispatch_epub_failure_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::rooted_at(tmp.path());
        fs::create_dir_all(layout.src_dir()).unwrap();
        fs::write(layout.src_dir().join("001.md"), "text").unwrap();
        fs::write(layout.meta_json(), r#"{"ABBR_TITLE":"B"}"#).unwrap();
        let runner = MockRunner::new();
        runner.fail_stage(novel_core::epub::EPUB_STAGE, 2, "boom");

        dispatch(Command::Epub, &runner, &layout).unwrap();
        assert!(layout.log_file().exists());
    }

    #[test]
    fn test_dispatch_without_metadata_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::rooted_at(tmp.path());
        fs::create_dir_all(layout.src_dir()).unwrap();
        fs::write(layout.src_dir().join("001.md"), "text").unwrap();

        let err = dispatch(Command::Paperback, &MockRunner::new(), &layout).unwrap_err();
        assert!(matches!(err, CoreError::MetadataNotFound(_)));
    }
}
