//! Core library for building a novel project into its publication formats.
//!
//! This crate turns a directory of Markdown chapters into a paperback PDF
//! (pandoc, weasyprint, pdfunite), an EPUB (pandoc) and a LaTeX manuscript
//! PDF (pandoc, lualatex). It also provides word counts and project
//! scaffolding.
//!
//! External tools run through the [`external::CommandRunner`] trait, so every
//! build can be exercised with [`external::mocks::MockRunner`] instead of the
//! real executables.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use novel_core::{BuildLog, ProjectLayout, SystemRunner, build_paperback};
//!
//! let layout = ProjectLayout::default();
//! let log = BuildLog::open(layout.log_file()).unwrap();
//!
//! let result = build_paperback(&SystemRunner, &layout, &log).unwrap();
//! if result.success {
//!     println!("Wrote {}", result.artifact.display());
//! }
//! ```

pub mod artifacts;
pub mod build_log;
pub mod config;
pub mod discovery;
pub mod epub;
pub mod error;
pub mod external;
pub mod manuscript;
pub mod metadata;
pub mod paperback;
pub mod scaffold;
pub mod utils;
pub mod word_count;

// Re-exports for public API
pub use artifacts::PaperbackFilenames;
pub use build_log::BuildLog;
pub use config::ProjectLayout;
pub use discovery::list_chapter_files;
pub use epub::build_epub;
pub use error::{CoreError, CoreResult};
pub use external::{CommandRunner, Stage, StageOutcome, SystemRunner};
pub use manuscript::build_manuscript;
pub use metadata::ProjectMetadata;
pub use paperback::build_paperback;
pub use scaffold::scaffold_project;
pub use utils::{clean_build_dir, sanitize};
pub use word_count::{WordCountReport, word_count};

use std::fmt;
use std::path::PathBuf;

/// Output format produced by a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTarget {
    Paperback,
    Epub,
    Manuscript,
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Paperback => "Paperback",
            Self::Epub => "EPUB",
            Self::Manuscript => "Manuscript",
        };
        f.write_str(name)
    }
}

/// Outcome of one build.
///
/// `success == false` is a conversion failure: some external tool exited
/// nonzero and its output is in the build log. The artifact path is set
/// either way; it only exists on disk after a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub target: BuildTarget,
    pub success: bool,
    pub artifact: PathBuf,
}
