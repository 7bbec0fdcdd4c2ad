// ============================================================================
// novel-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// The CLI reuses the core error type. This module adds context helpers and
// the mapping from an error to the process exit status.
//
// AI-ASSISTANT-INFO: CLI error handling utilities

// ---- Internal crate imports ----
use novel_core::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::fmt;

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Exit status for a successful run, including runs where a format failed
/// to convert.
pub const EXIT_OK: i32 = 0;

/// Exit status for usage, configuration and environment errors.
pub const EXIT_FAILURE: i32 = 1;

// ============================================================================
// ERROR CONVERSION UTILITIES
// ============================================================================

/// Extension trait for adding context to errors in the CLI.
///
/// Similar to anyhow's context methods, but produces a `CoreError`.
pub trait CliErrorContext<T> {
    /// Add context to an error.
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{context}: {core_error}"))
        })
    }
}

/// Every error that reaches `main` ends the process with status 1.
#[must_use]
pub fn exit_code(error: &CoreError) -> i32 {
    if error.is_environment_error() {
        log::error!("Environment error: {error}");
    } else if error.is_configuration_error() {
        log::error!("Configuration error: {error}");
    } else {
        log::error!("{error}");
    }
    EXIT_FAILURE
}
