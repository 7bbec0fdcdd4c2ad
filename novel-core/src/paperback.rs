// ============================================================================
// novel-core/src/paperback.rs
// ============================================================================
//
// PAPERBACK PIPELINE: Chapters + Frontmatter -> One Merged Paperback PDF
//
// Four external stages in dependency order:
//
//   1. text-to-html        pandoc: chapters (sorted) + stylesheet -> html_text
//   2. text-to-pdf         weasyprint: html_text -> pdf_text        (after 1)
//   3. frontmatter-to-pdf  weasyprint: html_frontmatter -> pdf_frontmatter
//   4. merge-pdf           pdfunite: pdf_frontmatter pdf_text -> final_pdf
//
// Stage 3 shares no files with stages 1-2, so it runs on its own scoped
// thread while the 1 -> 2 chain runs on the caller's thread. The stages
// block on child processes, so the fork is a real OS thread rather than a
// pool task that may never be stolen. Both branches are joined before
// stage 4, which only runs when both succeeded. A failed stage 1 means stage
// 2 is never attempted. A failed stage 3 still lets the chain run to
// completion (there is no cancellation) but stage 4 is skipped.
//
// Conversion failures are `Ok(false)`; the failing tool's output is already
// in the build log. Only environment errors (tool missing, unspawnable)
// come back as `Err`.
//
// AI-ASSISTANT-INFO: Paperback build pipeline with fork/join stage ordering

// ---- Internal crate imports ----
use crate::artifacts::PaperbackFilenames;
use crate::build_log::BuildLog;
use crate::config::{ProjectLayout, tools};
use crate::discovery::list_chapter_files;
use crate::error::{CoreError, CoreResult};
use crate::external::{CommandRunner, Stage};
use crate::metadata::load_abbr_title;
use crate::{BuildResult, BuildTarget};

// ---- External crate imports ----
use log::{info, warn};

// ---- Standard library imports ----
use std::path::{Path, PathBuf};
use std::thread;

/// Stable stage names, used in logs and by test runners.
pub mod stage_names {
    pub const TEXT_TO_HTML: &str = "text-to-html";
    pub const TEXT_TO_PDF: &str = "text-to-pdf";
    pub const FRONTMATTER_TO_PDF: &str = "frontmatter-to-pdf";
    pub const MERGE_PDF: &str = "merge-pdf";
}

// ============================================================================
// STAGE CONSTRUCTION
// ============================================================================

/// Stage 1: all chapters, in order, into one standalone HTML document.
#[must_use]
pub fn text_to_html_stage(
    chapters: &[PathBuf],
    stylesheet: &Path,
    names: &PaperbackFilenames,
) -> Stage {
    let mut stage = Stage::new(stage_names::TEXT_TO_HTML, tools::PANDOC)
        .args(["--verbose", "--standalone", "-f", "markdown", "-t", "html", "-c"])
        .input_arg(stylesheet);
    for chapter in chapters {
        stage = stage.input_arg(chapter);
    }
    stage.arg("-o").output_arg(&names.html_text)
}

/// Stage 2: render the body HTML to PDF.
#[must_use]
pub fn text_to_pdf_stage(names: &PaperbackFilenames) -> Stage {
    Stage::new(stage_names::TEXT_TO_PDF, tools::WEASYPRINT)
        .input_arg(&names.html_text)
        .output_arg(&names.pdf_text)
}

/// Stage 3: render the static frontmatter HTML to PDF.
#[must_use]
pub fn frontmatter_to_pdf_stage(names: &PaperbackFilenames) -> Stage {
    Stage::new(stage_names::FRONTMATTER_TO_PDF, tools::WEASYPRINT)
        .input_arg(&names.html_frontmatter)
        .output_arg(&names.pdf_frontmatter)
}

/// Stage 4: frontmatter first, then body text, into the final PDF.
#[must_use]
pub fn merge_stage(names: &PaperbackFilenames) -> Stage {
    Stage::new(stage_names::MERGE_PDF, tools::PDFUNITE)
        .input_arg(&names.pdf_frontmatter)
        .input_arg(&names.pdf_text)
        .output_arg(&names.final_pdf)
}

// ============================================================================
// EXECUTION
// ============================================================================

/// Runs one stage and reduces its outcome to success/failure.
pub(crate) fn run_stage<R: CommandRunner + ?Sized>(
    runner: &R,
    log: &BuildLog,
    stage: &Stage,
) -> CoreResult<bool> {
    let outcome = runner.run(stage, log)?;
    if !outcome.success {
        warn!(
            "Stage '{}' failed (exit code {}); see {}",
            stage.name(),
            outcome
                .exit_code
                .map_or_else(|| "none".to_string(), |c| c.to_string()),
            log.path().display()
        );
    }
    Ok(outcome.success)
}

/// Stages 1 -> 2, stopping at the first failure.
fn run_text_chain<R: CommandRunner + ?Sized>(
    runner: &R,
    log: &BuildLog,
    chapters: &[PathBuf],
    stylesheet: &Path,
    names: &PaperbackFilenames,
) -> CoreResult<bool> {
    if !run_stage(runner, log, &text_to_html_stage(chapters, stylesheet, names))? {
        return Ok(false);
    }
    run_stage(runner, log, &text_to_pdf_stage(names))
}

/// Runs the four paperback stages with their dependency ordering.
///
/// Returns `Ok(true)` only if all four stages succeeded.
pub fn run_pipeline<R: CommandRunner + ?Sized>(
    runner: &R,
    log: &BuildLog,
    chapters: &[PathBuf],
    stylesheet: &Path,
    names: &PaperbackFilenames,
) -> CoreResult<bool> {
    let (text_result, frontmatter_result) = thread::scope(|scope| {
        let frontmatter =
            scope.spawn(|| run_stage(runner, log, &frontmatter_to_pdf_stage(names)));
        let text = run_text_chain(runner, log, chapters, stylesheet, names);
        let frontmatter = frontmatter.join().unwrap_or_else(|_| {
            Err(CoreError::OperationFailed(format!(
                "Stage '{}' panicked",
                stage_names::FRONTMATTER_TO_PDF
            )))
        });
        (text, frontmatter)
    });

    // Both branches have resolved here; look at both before deciding.
    let text_ok = text_result?;
    let frontmatter_ok = frontmatter_result?;

    if !(text_ok && frontmatter_ok) {
        return Ok(false);
    }
    run_stage(runner, log, &merge_stage(names))
}

/// Builds the paperback PDF for the project described by `layout`.
///
/// Appends a `[[PAPERBACK]]` header to the log, creates the build and bin
/// directories, reads the abbreviated title and the chapter list, then runs
/// the pipeline.
pub fn build_paperback<R: CommandRunner + ?Sized>(
    runner: &R,
    layout: &ProjectLayout,
    log: &BuildLog,
) -> CoreResult<BuildResult> {
    info!("Compiling paperback");
    log.begin("PAPERBACK")?;
    layout.ensure_output_dirs()?;

    let abbr_title = load_abbr_title(&layout.meta_json())?;
    let names = PaperbackFilenames::compute(&abbr_title, layout);

    let source_dir = layout.src_dir();
    let chapters = list_chapter_files(&source_dir)?;
    if chapters.is_empty() {
        return Err(CoreError::NoChaptersFound(source_dir));
    }

    let success = run_pipeline(runner, log, &chapters, &layout.css_paperback(), &names)?;
    if success {
        log.finished()?;
        info!("Paperback written to {}", names.final_pdf.display());
    }

    Ok(BuildResult {
        target: BuildTarget::Paperback,
        success,
        artifact: names.final_pdf,
    })
}
