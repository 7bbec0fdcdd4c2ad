// ============================================================================
// novel-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for novel-core
//
// This module defines the error types used throughout the novel-core library.
// It uses thiserror to derive the std::error::Error implementation.
//
// A nonzero exit status from an external tool is NOT an error here: it is a
// conversion failure and travels as a `StageOutcome`. Only faults of the
// environment (missing tool, unspawnable process), configuration problems
// and filesystem failures become a `CoreError`.
//
// AI-ASSISTANT-INFO: Error types and result alias for the core library

// ---- External crate imports ----
use thiserror::Error;

// ---- Standard library imports ----
use std::io;
use std::path::PathBuf;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Custom error type for the novel-core library.
#[derive(Error, Debug)]
pub enum CoreError {
    /// I/O error from standard library operations
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required external executable could not be found on PATH
    #[error("Required external tool not found: '{0}'. Please ensure it is installed and on your PATH.")]
    DependencyNotFound(String),

    /// The external process exists but could not be started
    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, io::Error),

    /// The external process was started but waiting on it failed
    #[error("Failed to wait for command '{0}': {1}")]
    CommandWait(String, io::Error),

    /// The project metadata file (meta.json) is missing
    #[error("Project metadata not found at {}. Run 'init' first.", .0.display())]
    MetadataNotFound(PathBuf),

    /// The project metadata file could not be parsed
    #[error("Failed to parse project metadata {}: {}", .0.display(), .1)]
    MetadataParse(PathBuf, serde_json::Error),

    /// The manuscript configuration file (metadata.yml) is missing
    #[error("Manuscript configuration not found at {}. Please copy defaults.yml to metadata.yml and edit to suit your project.", .0.display())]
    ManuscriptConfigNotFound(PathBuf),

    /// The manuscript configuration file could not be parsed
    #[error("Failed to parse manuscript configuration {}: {}", .0.display(), .1)]
    ManuscriptConfigParse(PathBuf, serde_yaml::Error),

    /// The source directory holds no chapter files
    #[error("No chapter files (*.md) found in {}", .0.display())]
    NoChaptersFound(PathBuf),

    /// JSON serialization failure when writing metadata
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic operation failure with a descriptive message
    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl CoreError {
    /// True for faults of the execution environment (tool missing or
    /// unspawnable), which abort the run instead of being reported.
    #[must_use]
    pub fn is_environment_error(&self) -> bool {
        matches!(
            self,
            Self::DependencyNotFound(_) | Self::CommandStart(..) | Self::CommandWait(..)
        )
    }

    /// True for missing or malformed project configuration files.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MetadataNotFound(_)
                | Self::MetadataParse(..)
                | Self::ManuscriptConfigNotFound(_)
                | Self::ManuscriptConfigParse(..)
                | Self::NoChaptersFound(_)
        )
    }
}

/// Result type for novel-core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Maps a spawn failure onto the environment error taxonomy.
///
/// `NotFound` means the executable is absent from PATH; anything else means
/// it exists but could not be started.
pub(crate) fn command_start_error(program: &str, err: io::Error) -> CoreError {
    if err.kind() == io::ErrorKind::NotFound {
        CoreError::DependencyNotFound(program.to_string())
    } else {
        CoreError::CommandStart(program.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_start_error_not_found() {
        let err = command_start_error("pandoc", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, CoreError::DependencyNotFound(ref p) if p == "pandoc"));
        assert!(err.is_environment_error());
    }

    #[test]
    fn test_command_start_error_other() {
        let err = command_start_error(
            "weasyprint",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, CoreError::CommandStart(ref p, _) if p == "weasyprint"));
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_metadata_not_found_is_configuration_error() {
        let err = CoreError::MetadataNotFound(PathBuf::from("../meta.json"));
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("../meta.json"));
    }
}
