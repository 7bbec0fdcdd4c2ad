// novel-cli/src/lib.rs
//
// Library portion of the Novel Builder CLI application.
// Contains argument definitions, command logic and the top-level run loop.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{Action, Cli, Command};
pub use commands::dispatch;
pub use error::{CliErrorContext, CliResult};

use error::{EXIT_FAILURE, EXIT_OK};
use novel_core::config::TOOL_DIR_NAME;
use novel_core::{CommandRunner, ProjectLayout};

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// True when `cwd` is the tool's own directory inside a project.
#[must_use]
pub fn in_tool_directory(cwd: &Path) -> bool {
    cwd.file_name().and_then(|name| name.to_str()) == Some(TOOL_DIR_NAME)
}

/// Picks the directory the working-directory guard checks.
///
/// The shell's logical `PWD` keeps symlinked directory names, so it wins when
/// it names the same directory as the process cwd. A stale or relative `PWD`
/// is ignored.
#[must_use]
pub fn working_directory(pwd: Option<OsString>, cwd: PathBuf) -> PathBuf {
    let Some(logical) = pwd.map(PathBuf::from).filter(|p| p.is_absolute()) else {
        return cwd;
    };
    match (fs::canonicalize(&logical), fs::canonicalize(&cwd)) {
        (Ok(a), Ok(b)) if a == b => logical,
        _ => cwd,
    }
}

/// Runs the CLI for `args` from `cwd` and returns the process exit status.
///
/// Order: banner, working-directory guard, argument resolution, logging
/// setup, command.
pub fn run<I, T, R>(args: I, cwd: &Path, runner: &R) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    R: CommandRunner + ?Sized,
{
    terminal::print_banner(cli::VERSION);

    if !in_tool_directory(cwd) {
        eprintln!("[Error] Novel Builder must be run from inside its own directory ({TOOL_DIR_NAME}).");
        return EXIT_FAILURE;
    }

    let command = match cli::resolve(args) {
        Action::Help => {
            terminal::print_usage(cli::USAGE);
            return EXIT_OK;
        }
        Action::Version => {
            terminal::print_version(cli::VERSION);
            return EXIT_OK;
        }
        Action::Usage => {
            terminal::print_usage(cli::USAGE);
            return EXIT_FAILURE;
        }
        Action::Run(command) => command,
    };

    let layout = ProjectLayout::default();
    if let Err(e) = setup_logging(command, &layout) {
        terminal::print_error(&e, &layout.log_file());
        return error::exit_code(&e);
    }
    log::debug!("Running '{}' in {}", command, cwd.display());

    match dispatch(command, runner, &layout) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            terminal::print_error(&e, &layout.log_file());
            error::exit_code(&e)
        }
    }
}

/// Build commands also log to the build log file.
fn setup_logging(command: Command, layout: &ProjectLayout) -> CliResult<()> {
    let log_file = if command.builds() {
        layout
            .ensure_output_dirs()
            .cli_context("Failed to create output directories")?;
        Some(layout.log_file())
    } else {
        None
    };
    logging::init_logging(log_file.as_deref()).map_err(|e| {
        novel_core::CoreError::OperationFailed(format!("Failed to initialize logging: {e}"))
    })
}
