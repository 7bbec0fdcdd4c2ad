//! EPUB build.
//!
//! A single pandoc invocation turns the sorted chapters into an EPUB, using
//! the project's `epub.yml` for title/author metadata.

use crate::artifacts::epub_path;
use crate::build_log::BuildLog;
use crate::config::{ProjectLayout, tools};
use crate::discovery::list_chapter_files;
use crate::error::{CoreError, CoreResult};
use crate::external::{CommandRunner, Stage};
use crate::metadata::load_abbr_title;
use crate::paperback::run_stage;
use crate::{BuildResult, BuildTarget};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const EPUB_STAGE: &str = "epub";

/// The pandoc EPUB stage for `chapters`, writing `output`.
#[must_use]
pub fn epub_stage(chapters: &[PathBuf], metadata_file: &Path, output: &Path) -> Stage {
    let mut metadata_arg = OsString::from("--metadata-file=");
    metadata_arg.push(metadata_file.as_os_str());

    let mut stage = Stage::new(EPUB_STAGE, tools::PANDOC)
        .arg("--verbose")
        .arg(metadata_arg)
        .reads(metadata_file)
        .arg("-o")
        .output_arg(output);
    for chapter in chapters {
        stage = stage.input_arg(chapter);
    }
    stage
}

/// Builds `<bin>/<abbr>.epub`.
pub fn build_epub<R: CommandRunner + ?Sized>(
    runner: &R,
    layout: &ProjectLayout,
    log: &BuildLog,
) -> CoreResult<BuildResult> {
    log::info!("Compiling EPUB");
    log.begin("EPUB")?;
    layout.ensure_output_dirs()?;

    let abbr_title = load_abbr_title(&layout.meta_json())?;
    let output = epub_path(&abbr_title, layout);

    let source_dir = layout.src_dir();
    let chapters = list_chapter_files(&source_dir)?;
    if chapters.is_empty() {
        return Err(CoreError::NoChaptersFound(source_dir));
    }

    let stage = epub_stage(&chapters, &layout.epub_metadata(), &output);
    let success = run_stage(runner, log, &stage)?;
    if success {
        log.finished()?;
    }

    Ok(BuildResult {
        target: BuildTarget::Epub,
        success,
        artifact: output,
    })
}
