// ============================================================================
// novel-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: Styled Messages and Build Spinner
//
// User-facing output goes to stdout through these helpers; diagnostics go
// through the `log` facade instead. Styling comes from `console`, which
// drops colors automatically when stdout is not a terminal or NO_COLOR is
// set.
//
// AI-ASSISTANT-INFO: Terminal UI helpers for the CLI

// ---- Internal crate imports ----
use novel_core::{BuildResult, CoreError};

// ---- External crate imports ----
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

// ---- Standard library imports ----
use std::path::Path;
use std::time::Duration;

/// Banner printed before anything else.
pub fn print_banner(version: &str) {
    println!("{}\n", style(format!("Novel Builder v{version}")).bold());
}

pub fn print_usage(usage: &str) {
    println!("{usage}");
}

pub fn print_version(version: &str) {
    println!("novel-builder v{version}");
}

/// Step heading, e.g. while scaffolding.
pub fn print_step(message: &str) {
    println!("{} {}", style("∘").cyan(), message);
}

/// Item under a step.
pub fn print_sub_item(message: &str) {
    println!("  ↳ {message}");
}

pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), style(message).green());
}

pub fn print_warning(message: &str) {
    println!("{} {}", style("⚠").yellow().bold(), style(message).yellow());
}

/// Message for a fatal error. Environment errors come from build commands,
/// whose log holds the details.
#[must_use]
pub fn error_message(error: &CoreError, log_path: &Path) -> String {
    if error.is_environment_error() {
        format!("{error} See {} for details.", log_path.display())
    } else {
        error.to_string()
    }
}

/// Fatal error, on stderr.
pub fn print_error(error: &CoreError, log_path: &Path) {
    eprintln!(
        "{} {}",
        style("✗ Error:").red().bold(),
        style(error_message(error, log_path)).red()
    );
}

/// Message reporting one build.
#[must_use]
pub fn result_message(result: &BuildResult, log_path: &Path) -> String {
    if result.success {
        format!("{} finished successfully!", result.target)
    } else {
        format!(
            "{} compilation failed! See {} for details.",
            result.target,
            log_path.display()
        )
    }
}

/// Prints the outcome of one build.
pub fn print_build_result(result: &BuildResult, log_path: &Path) {
    let message = result_message(result, log_path);
    if result.success {
        print_success(&message);
    } else {
        print_warning(&message);
    }
}

/// Spinner on stderr while a format builds. Hidden when stderr is not a
/// terminal.
#[must_use]
pub fn start_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("  {spinner} {msg}") {
        pb.set_style(spinner_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use novel_core::BuildTarget;
    use std::path::PathBuf;

    #[test]
    fn test_result_messages() {
        let mut result = BuildResult {
            target: BuildTarget::Epub,
            success: true,
            artifact: PathBuf::from("../bin/Book.epub"),
        };
        let log = Path::new("../build/build.log");
        assert_eq!(result_message(&result, log), "EPUB finished successfully!");

        result.success = false;
        assert_eq!(
            result_message(&result, log),
            "EPUB compilation failed! See ../build/build.log for details."
        );
    }

    #[test]
    fn test_environment_error_points_at_log() {
        let log = Path::new("../build/build.log");
        let missing = CoreError::DependencyNotFound("pandoc".into());
        let message = error_message(&missing, log);
        assert!(message.contains("'pandoc'"));
        assert!(message.ends_with("See ../build/build.log for details."));

        let config = CoreError::MetadataNotFound("../meta.json".into());
        assert!(!error_message(&config, log).contains("build.log"));
    }
}
