//! Project layout and tool constants for the novel-core library.
//!
//! Novel Builder is run from its own directory (`novel-builder`) placed inside
//! a book project, so every project path is a fixed location relative to the
//! parent directory. These locations are not configurable per invocation;
//! `ProjectLayout` gathers them so they can be rooted elsewhere in tests.

use std::path::PathBuf;

// Default constants

/// Name of the directory the tool must be run from.
pub const TOOL_DIR_NAME: &str = "novel-builder";

/// Project root relative to the tool directory.
pub const DEFAULT_PROJECT_ROOT: &str = "..";

/// Chapter sources and static assets.
pub const SRC_DIR: &str = "src";

/// Intermediate artifacts and the build log.
pub const BUILD_DIR: &str = "build";

/// Final outputs.
pub const BIN_DIR: &str = "bin";

/// Project metadata written by `init` (JSON).
pub const META_JSON: &str = "meta.json";

/// Pandoc EPUB metadata file (YAML).
pub const EPUB_METADATA_YML: &str = "epub.yml";

/// LaTeX manuscript configuration (YAML).
pub const MANUSCRIPT_CONFIG_YML: &str = "metadata.yml";

/// File name of the append-only build log inside the build directory.
pub const LOG_FILE_NAME: &str = "build.log";

/// Markdown extension selected by chapter discovery.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Reading speed used for reading time estimates.
pub const WORDS_PER_MINUTE: usize = 250;

/// External programs driven by the builds.
pub mod tools {
    pub const PANDOC: &str = "pandoc";
    pub const WEASYPRINT: &str = "weasyprint";
    pub const PDFUNITE: &str = "pdfunite";
    pub const LUALATEX: &str = "lualatex";
}

/// Fixed directory and file layout of a book project.
///
/// # Examples
///
/// ```rust
/// use novel_core::config::ProjectLayout;
/// use std::path::Path;
///
/// let layout = ProjectLayout::default();
/// assert_eq!(layout.build_dir(), Path::new("../build"));
/// assert_eq!(layout.log_file(), Path::new("../build/build.log"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::rooted_at(DEFAULT_PROJECT_ROOT)
    }
}

impl ProjectLayout {
    /// Creates a layout with the given project root.
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn src_dir(&self) -> PathBuf {
        self.root.join(SRC_DIR)
    }

    #[must_use]
    pub fn html_dir(&self) -> PathBuf {
        self.src_dir().join("html")
    }

    #[must_use]
    pub fn css_dir(&self) -> PathBuf {
        self.src_dir().join("css")
    }

    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR)
    }

    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join(BIN_DIR)
    }

    #[must_use]
    pub fn meta_json(&self) -> PathBuf {
        self.root.join(META_JSON)
    }

    #[must_use]
    pub fn epub_metadata(&self) -> PathBuf {
        self.root.join(EPUB_METADATA_YML)
    }

    #[must_use]
    pub fn manuscript_config(&self) -> PathBuf {
        self.root.join(MANUSCRIPT_CONFIG_YML)
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.build_dir().join(LOG_FILE_NAME)
    }

    /// Static paperback frontmatter page generated by `init`.
    #[must_use]
    pub fn html_frontmatter(&self) -> PathBuf {
        self.html_dir().join("paperback_frontmatter.html")
    }

    /// Stylesheet applied to the paperback body text.
    #[must_use]
    pub fn css_paperback(&self) -> PathBuf {
        self.css_dir().join("paperback.css")
    }

    /// Creates the build and bin directories if they are missing.
    pub fn ensure_output_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.build_dir())?;
        std::fs::create_dir_all(self.bin_dir())
    }
}
