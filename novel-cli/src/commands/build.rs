// ============================================================================
// novel-cli/src/commands/build.rs
// ============================================================================
//
// BUILD COMMANDS: paperback, epub, manuscript and all
//
// Each format build runs under a spinner and ends with a success or failure
// line naming the build log. A failed conversion is reported and the command
// still succeeds; only errors (missing tool, bad configuration, I/O) stop it.
//
// AI-ASSISTANT-INFO: Format build commands for the CLI

// ---- Internal crate imports ----
use crate::commands::wc;
use crate::error::CliResult;
use crate::terminal;

// ---- External crate imports ----
use novel_core::{
    BuildLog, BuildResult, BuildTarget, CommandRunner, CoreResult, ProjectLayout, build_epub,
    build_manuscript, build_paperback,
};

/// Runs the build for `target` and prints its outcome.
pub fn run_target<R: CommandRunner + ?Sized>(
    target: BuildTarget,
    runner: &R,
    layout: &ProjectLayout,
    log: &BuildLog,
) -> CliResult<BuildResult> {
    let spinner = terminal::start_spinner(&format!("Compiling {target}..."));
    let result = build(target, runner, layout, log);
    spinner.finish_and_clear();

    let result = result?;
    terminal::print_build_result(&result, log.path());
    Ok(result)
}

fn build<R: CommandRunner + ?Sized>(
    target: BuildTarget,
    runner: &R,
    layout: &ProjectLayout,
    log: &BuildLog,
) -> CoreResult<BuildResult> {
    match target {
        BuildTarget::Paperback => build_paperback(runner, layout, log),
        BuildTarget::Epub => build_epub(runner, layout, log),
        BuildTarget::Manuscript => build_manuscript(runner, layout, log),
    }
}

/// `all`: paperback, then EPUB, then the word count.
///
/// EPUB is attempted even when the paperback failed to convert.
pub fn run_all<R: CommandRunner + ?Sized>(
    runner: &R,
    layout: &ProjectLayout,
    log: &BuildLog,
) -> CliResult<Vec<BuildResult>> {
    let paperback = run_target(BuildTarget::Paperback, runner, layout, log)?;
    let epub = run_target(BuildTarget::Epub, runner, layout, log)?;
    wc::run(layout)?;
    Ok(vec![paperback, epub])
}

#[cfg(test)]
mod tests {
    use super::*;
    use novel_core::external::mocks::MockRunner;
    use novel_core::paperback::stage_names;
    use std::fs;

    fn project() -> (tempfile::TempDir, ProjectLayout, BuildLog) {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::rooted_at(tmp.path());
        fs::create_dir_all(layout.src_dir()).unwrap();
        fs::write(layout.src_dir().join("001-intro.md"), "Hello world").unwrap();
        fs::write(layout.meta_json(), r#"{"ABBR_TITLE":"MyBook"}"#).unwrap();
        let log = BuildLog::open(layout.log_file()).unwrap();
        (tmp, layout, log)
    }

    #[test]
    fn test_run_target_paperback() {
        let (_tmp, layout, log) = project();
        let runner = MockRunner::new();

        let result = run_target(BuildTarget::Paperback, &runner, &layout, &log).unwrap();
        assert!(result.success);
        assert_eq!(runner.stage_names().len(), 4);
    }

    #[test]
    fn test_all_attempts_epub_after_paperback_failure() {
        let (_tmp, layout, log) = project();
        let runner = MockRunner::new();
        runner.fail_stage(stage_names::TEXT_TO_HTML, 1, "pandoc failed");

        let results = run_all(&runner, &layout, &log).unwrap();

        assert_eq!(results.len(), 2);
        assert!(!results[0].success);
        assert_eq!(results[1].target, BuildTarget::Epub);
        assert!(results[1].success);
        assert!(runner.was_invoked(novel_core::epub::EPUB_STAGE));
    }

    #[test]
    fn test_missing_tool_aborts_all() {
        let (_tmp, layout, log) = project();
        let runner = MockRunner::new();
        runner.missing_tool(stage_names::TEXT_TO_HTML);

        assert!(run_all(&runner, &layout, &log).is_err());
        assert!(!runner.was_invoked(novel_core::epub::EPUB_STAGE));
    }
}
