//! Chapter discovery module.
//!
//! Chapters are plain Markdown files in the top level of the project's source
//! directory. There is no chapter-ordering metadata: the ascending
//! lexicographic order of the file names IS the chapter order in every output
//! format, so chapters are expected to carry sortable prefixes such as
//! `001-`, `002-`.

use crate::config::MARKDOWN_EXTENSION;
use crate::error::CoreResult;

use std::path::{Path, PathBuf};

/// Lists the chapter source files of `source_dir` in chapter order.
///
/// This function scans the top level of the provided directory for regular
/// files with the `.md` extension and returns their paths sorted by file name.
/// Subdirectories (such as `src/html` and `src/css`) and other file types are
/// ignored. An empty result is not an error.
///
/// # Arguments
///
/// * `source_dir` - The directory holding the chapter Markdown files
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - The chapter paths, sorted ascending by file name
/// * `Err(CoreError::Io)` - If the directory cannot be read
///
/// # Examples
///
/// ```rust,no_run
/// use novel_core::list_chapter_files;
/// use std::path::Path;
///
/// for chapter in list_chapter_files(Path::new("../src")).unwrap() {
///     println!("{}", chapter.display());
/// }
/// ```
pub fn list_chapter_files(source_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(source_dir)?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if !path.is_file() {
                return None;
            }

            path.extension()
                .filter(|ext| ext.to_str() == Some(MARKDOWN_EXTENSION))
                .map(|_| path.clone())
        })
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    log::debug!(
        "Found {} chapter file(s) in {}",
        files.len(),
        source_dir.display()
    );
    Ok(files)
}

/// Chapter name used in reports: the file name without its extension.
#[must_use]
pub fn chapter_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
