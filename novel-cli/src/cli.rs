// ============================================================================
// novel-cli/src/cli.rs
// ============================================================================
//
// COMMAND LINE: Argument Structures and Action Resolution
//
// The tool takes exactly one argument: an option (-h/-v) or a command verb.
// clap does the parsing; `resolve` turns the parsed arguments (or the parse
// error) into the single action the binary performs.
//
// clap's built-in help and version output are disabled so the usage text
// and the version line stay in the tool's own format.
//
// AI-ASSISTANT-INFO: CLI argument definitions and usage text

// ---- External crate imports ----
use clap::{ArgAction, Parser, ValueEnum};

// ---- Standard library imports ----
use std::ffi::OsString;
use std::fmt;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
Usage: novel-builder [OPTION or COMMAND]

OPTIONs:
    -h, --help      Print this help message and exit
    -v, --version   Print version and exit

COMMAND must be one of:
    init            Configure a new project.
    clean           Remove build directory.
    wc              Print the word count for each chapter, a grand total, and estimated reading time
    all             Build all formats
    manuscript      \\
    paperback       - Build only selected output format
    epub            /
";

// ============================================================================
// ARGUMENT DEFINITION
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "novel-builder",
    about = "Novel Builder: builds a novel project into paperback, EPUB and manuscript formats",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Print this help message and exit
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    pub help: bool,

    /// Print version and exit
    #[arg(short = 'v', long = "version", action = ArgAction::SetTrue)]
    pub version: bool,

    /// The command to run
    #[arg(value_enum)]
    pub command: Option<Command>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Configure a new project
    Init,
    /// Remove the build directory
    Clean,
    /// Word count per chapter, grand total and reading time
    Wc,
    /// Build all formats
    All,
    /// Build the LaTeX manuscript
    Manuscript,
    /// Build the paperback PDF
    Paperback,
    /// Build the EPUB
    Epub,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::Clean => "clean",
            Self::Wc => "wc",
            Self::All => "all",
            Self::Manuscript => "manuscript",
            Self::Paperback => "paperback",
            Self::Epub => "epub",
        };
        f.write_str(name)
    }
}

// ============================================================================
// ACTION RESOLUTION
// ============================================================================

/// What the binary should do for a given argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Print usage, exit 0
    Help,
    /// Print the version line, exit 0
    Version,
    Run(Command),
    /// Missing, unknown or extra arguments: print usage, exit 1
    Usage,
}

impl Cli {
    /// Reduces parsed arguments to one action. Exactly one of help, version
    /// or a command must be present.
    #[must_use]
    pub fn action(&self) -> Action {
        match (self.help, self.version, self.command) {
            (true, false, None) => Action::Help,
            (false, true, None) => Action::Version,
            (false, false, Some(command)) => Action::Run(command),
            _ => Action::Usage,
        }
    }
}

/// Parses `args` (program name first) into an action.
pub fn resolve<I, T>(args: I) -> Action
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => cli.action(),
        Err(e) => {
            log::debug!("Argument parsing failed: {}", e);
            Action::Usage
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_commands() {
        assert_eq!(
            resolve(["novel-builder", "paperback"]),
            Action::Run(Command::Paperback)
        );
        assert_eq!(resolve(["novel-builder", "wc"]), Action::Run(Command::Wc));
        assert_eq!(resolve(["novel-builder", "all"]), Action::Run(Command::All));
        assert_eq!(resolve(["novel-builder", "init"]), Action::Run(Command::Init));
    }

    #[test]
    fn test_resolve_options() {
        assert_eq!(resolve(["novel-builder", "-h"]), Action::Help);
        assert_eq!(resolve(["novel-builder", "--help"]), Action::Help);
        assert_eq!(resolve(["novel-builder", "-v"]), Action::Version);
        assert_eq!(resolve(["novel-builder", "--version"]), Action::Version);
    }

    #[test]
    fn test_resolve_usage_errors() {
        assert_eq!(resolve(["novel-builder"]), Action::Usage);
        assert_eq!(resolve(["novel-builder", "foo"]), Action::Usage);
        assert_eq!(resolve(["novel-builder", "epub", "wc"]), Action::Usage);
        assert_eq!(resolve(["novel-builder", "-v", "epub"]), Action::Usage);
        assert_eq!(resolve(["novel-builder", "-h", "-v"]), Action::Usage);
        assert_eq!(resolve(["novel-builder", "--bogus"]), Action::Usage);
    }

    #[test]
    fn test_usage_lists_every_command() {
        for command in Command::value_variants() {
            assert!(USAGE.contains(&format!("    {command}")), "{command} missing");
        }
    }
}
