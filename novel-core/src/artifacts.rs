//! Artifact naming.
//!
//! Output file names are derived from the project's abbreviated title and the
//! fixed project layout. Everything here is a pure function of its inputs: no
//! filesystem access, no shared state.

use crate::config::ProjectLayout;

use std::path::PathBuf;

/// Paths used by one paperback build, keyed by their role in the pipeline.
///
/// Computed once per run and passed by reference to every stage
/// constructor. All fields are set at construction, so a stage can never read
/// an unset path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperbackFilenames {
    /// Standalone HTML rendering of all chapters
    pub html_text: PathBuf,
    /// PDF rendering of `html_text`
    pub pdf_text: PathBuf,
    /// Static frontmatter page produced by `init`
    pub html_frontmatter: PathBuf,
    /// PDF rendering of `html_frontmatter`
    pub pdf_frontmatter: PathBuf,
    /// Merged paperback PDF delivered to the bin directory
    pub final_pdf: PathBuf,
}

impl PaperbackFilenames {
    /// Computes the paperback file set for `abbr_title`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use novel_core::artifacts::PaperbackFilenames;
    /// use novel_core::config::ProjectLayout;
    /// use std::path::Path;
    ///
    /// let names = PaperbackFilenames::compute("MyBook", &ProjectLayout::default());
    /// assert_eq!(names.final_pdf, Path::new("../bin/MyBook-paperback.pdf"));
    /// assert_eq!(names.pdf_text, Path::new("../build/paperback_text.pdf"));
    /// ```
    #[must_use]
    pub fn compute(abbr_title: &str, layout: &ProjectLayout) -> Self {
        let build_dir = layout.build_dir();
        Self {
            html_text: build_dir.join("paperback.html"),
            pdf_text: build_dir.join("paperback_text.pdf"),
            html_frontmatter: layout.html_frontmatter(),
            pdf_frontmatter: build_dir.join("paperback_frontmatter.pdf"),
            final_pdf: layout.bin_dir().join(format!("{abbr_title}-paperback.pdf")),
        }
    }
}

/// Final EPUB path: `<bin>/<abbr>.epub`.
#[must_use]
pub fn epub_path(abbr_title: &str, layout: &ProjectLayout) -> PathBuf {
    layout.bin_dir().join(format!("{abbr_title}.epub"))
}

/// Final manuscript PDF path: `<bin>/<abbr>-manuscript.pdf`.
#[must_use]
pub fn manuscript_path(abbr_title: &str, layout: &ProjectLayout) -> PathBuf {
    layout.bin_dir().join(format!("{abbr_title}-manuscript.pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_is_deterministic() {
        let layout = ProjectLayout::rooted_at("/projects/book");
        let first = PaperbackFilenames::compute("Saga", &layout);
        let second = PaperbackFilenames::compute("Saga", &layout);
        assert_eq!(first, second);
    }

    #[test]
    fn test_compute_uses_layout_directories() {
        let layout = ProjectLayout::rooted_at("/projects/book");
        let names = PaperbackFilenames::compute("Saga", &layout);

        assert_eq!(names.html_text, PathBuf::from("/projects/book/build/paperback.html"));
        assert_eq!(
            names.pdf_frontmatter,
            PathBuf::from("/projects/book/build/paperback_frontmatter.pdf")
        );
        assert_eq!(
            names.html_frontmatter,
            PathBuf::from("/projects/book/src/html/paperback_frontmatter.html")
        );
        assert_eq!(
            names.final_pdf,
            PathBuf::from("/projects/book/bin/Saga-paperback.pdf")
        );
    }

    #[test]
    fn test_other_artifact_paths() {
        let layout = ProjectLayout::default();
        assert_eq!(epub_path("Saga", &layout), PathBuf::from("../bin/Saga.epub"));
        assert_eq!(
            manuscript_path("Saga", &layout),
            PathBuf::from("../bin/Saga-manuscript.pdf")
        );
    }
}
