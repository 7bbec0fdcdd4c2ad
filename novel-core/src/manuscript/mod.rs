// ============================================================================
// novel-core/src/manuscript/mod.rs
// ============================================================================
//
// MANUSCRIPT BUILD: Chapters -> LaTeX (novel class) -> lualatex -> PDF
//
// 1. Read `metadata.yml` into a `ManuscriptConfig`.
// 2. For each chapter (sorted), take the first `# Title` line as the chapter
//    title, write the rest to `<build>/manuscript/<stem>.md` and convert it
//    with pandoc to `<stem>.tex`. Chapters convert in parallel; the document
//    keeps chapter order.
// 3. Assemble preamble + chapters, write `<build>/<tex_filename>`.
// 4. Compile with lualatex and copy the PDF to `<bin>/<abbr>-manuscript.pdf`.
//
// AI-ASSISTANT-INFO: Manuscript PDF build via pandoc and lualatex

pub mod fields;

// ---- Internal crate imports ----
use crate::artifacts::manuscript_path;
use crate::build_log::BuildLog;
use crate::config::{ProjectLayout, tools};
use crate::discovery::{chapter_name, list_chapter_files};
use crate::error::{CoreError, CoreResult};
use crate::external::{CommandRunner, Stage};
use crate::metadata::load_abbr_title;
use crate::paperback::run_stage;
use crate::{BuildResult, BuildTarget};

// ---- External crate imports ----
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

// ---- Standard library imports ----
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CHAPTER_TO_LATEX_STAGE: &str = "chapter-to-latex";
pub const LUALATEX_STAGE: &str = "lualatex";

/// Subdirectory of the build directory holding per-chapter intermediates.
pub const MANUSCRIPT_WORK_DIR: &str = "manuscript";

// ============================================================================
// CONFIGURATION
// ============================================================================

fn default_tex_filename() -> String {
    "manuscript.tex".to_string()
}

/// Contents of `metadata.yml`.
///
/// Each section is kept as a raw mapping; the field table in [`fields`]
/// decides which keys matter and how they render.
#[derive(Debug, Clone, Deserialize)]
pub struct ManuscriptConfig {
    #[serde(default = "default_tex_filename")]
    pub tex_filename: String,
    #[serde(default)]
    pub metadata: Mapping,
    #[serde(default)]
    pub dimensions: Mapping,
    #[serde(default)]
    pub fonts: Mapping,
    #[serde(default, rename = "headerFooter")]
    pub header_footer: Mapping,
    #[serde(default, rename = "chapterStyle")]
    pub chapter_style: Mapping,
    #[serde(default)]
    pub other: Mapping,
}

impl Default for ManuscriptConfig {
    fn default() -> Self {
        Self {
            tex_filename: default_tex_filename(),
            metadata: Mapping::new(),
            dimensions: Mapping::new(),
            fonts: Mapping::new(),
            header_footer: Mapping::new(),
            chapter_style: Mapping::new(),
            other: Mapping::new(),
        }
    }
}

impl ManuscriptConfig {
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CoreError::ManuscriptConfigNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        // An empty file deserializes as null; treat it as all defaults.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .map_err(|e| CoreError::ManuscriptConfigParse(path.to_path_buf(), e))
    }

    /// Section mapping by its YAML name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Mapping> {
        match name {
            "metadata" => Some(&self.metadata),
            "dimensions" => Some(&self.dimensions),
            "fonts" => Some(&self.fonts),
            "headerFooter" => Some(&self.header_footer),
            "chapterStyle" => Some(&self.chapter_style),
            "other" => Some(&self.other),
            _ => None,
        }
    }

    /// Whether chapters should start on a recto page.
    #[must_use]
    pub fn recto(&self) -> bool {
        self.chapter_style
            .get("recto")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    #[must_use]
    pub fn render_header(&self) -> String {
        fields::render_header(|name| self.section(name))
    }
}

// ============================================================================
// CHAPTER PREPARATION
// ============================================================================

/// Splits off the first `# Title` line.
///
/// Returns the title and the remaining text, or `None` when the chapter has
/// no level-one heading.
#[must_use]
pub fn split_chapter_heading(content: &str) -> Option<(String, String)> {
    let lines: Vec<&str> = content.lines().collect();
    let index = lines
        .iter()
        .position(|line| line.starts_with("# ") && line.len() > 2)?;
    let title = lines[index][2..].to_string();
    let body = lines
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, line)| *line)
        .collect::<Vec<_>>()
        .join("\n");
    Some((title, body))
}

/// A chapter ready for conversion.
#[derive(Debug, Clone)]
struct PreparedChapter {
    title: String,
    markdown: PathBuf,
    latex: PathBuf,
}

/// pandoc stage converting one chapter body to a LaTeX fragment.
#[must_use]
pub fn chapter_to_latex_stage(markdown: &Path, latex: &Path) -> Stage {
    Stage::new(CHAPTER_TO_LATEX_STAGE, tools::PANDOC)
        .args(["-f", "markdown", "-t", "latex", "-o"])
        .output_arg(latex)
        .input_arg(markdown)
}

/// lualatex stage compiling `tex` into `<output_dir>/<stem>.pdf`.
#[must_use]
pub fn lualatex_stage(tex: &Path, output_dir: &Path) -> Stage {
    let mut output_arg = OsString::from("--output-directory=");
    output_arg.push(output_dir.as_os_str());

    let mut pdf_name = tex.file_stem().unwrap_or_default().to_os_string();
    pdf_name.push(".pdf");
    let pdf = output_dir.join(pdf_name);

    Stage::new(LUALATEX_STAGE, tools::LUALATEX)
        .arg("-interaction=nonstopmode")
        .arg(output_arg)
        .input_arg(tex)
        .writes(pdf)
}

fn prepare_chapters(chapters: &[PathBuf], work_dir: &Path) -> CoreResult<Vec<PreparedChapter>> {
    let mut prepared = Vec::with_capacity(chapters.len());
    for path in chapters {
        let content = fs::read_to_string(path)?;
        let Some((title, body)) = split_chapter_heading(&content) else {
            warn!(
                "Skipping {}: no '# Title' heading found",
                path.display()
            );
            continue;
        };
        let stem = chapter_name(path);
        let markdown = work_dir.join(format!("{stem}.md"));
        fs::write(&markdown, body)?;
        prepared.push(PreparedChapter {
            title,
            latex: work_dir.join(format!("{stem}.tex")),
            markdown,
        });
    }
    Ok(prepared)
}

/// Converts every prepared chapter, in parallel, and renders the chapter
/// blocks in the original order.
///
/// `Ok(None)` means at least one conversion failed.
fn convert_chapters<R: CommandRunner + ?Sized>(
    runner: &R,
    log: &BuildLog,
    chapters: &[PreparedChapter],
    recto: bool,
) -> CoreResult<Option<String>> {
    let results: Vec<CoreResult<bool>> = chapters
        .par_iter()
        .map(|c| run_stage(runner, log, &chapter_to_latex_stage(&c.markdown, &c.latex)))
        .collect();

    let mut all_ok = true;
    for result in results {
        all_ok &= result?;
    }
    if !all_ok {
        return Ok(None);
    }

    let mut body = String::new();
    for chapter in chapters {
        let latex = fs::read_to_string(&chapter.latex)?;
        body.push_str(&fields::chapter(&chapter.title, recto, &latex));
    }
    Ok(Some(body))
}

// ============================================================================
// BUILD
// ============================================================================

/// Builds `<bin>/<abbr>-manuscript.pdf` from the chapters and `metadata.yml`.
pub fn build_manuscript<R: CommandRunner + ?Sized>(
    runner: &R,
    layout: &ProjectLayout,
    log: &BuildLog,
) -> CoreResult<BuildResult> {
    info!("Compiling manuscript");
    log.begin("MANUSCRIPT")?;
    layout.ensure_output_dirs()?;

    let config = ManuscriptConfig::load(&layout.manuscript_config())?;
    let abbr_title = load_abbr_title(&layout.meta_json())?;
    let artifact = manuscript_path(&abbr_title, layout);

    let source_dir = layout.src_dir();
    let chapters = list_chapter_files(&source_dir)?;
    if chapters.is_empty() {
        return Err(CoreError::NoChaptersFound(source_dir));
    }

    let build_dir = layout.build_dir();
    let work_dir = build_dir.join(MANUSCRIPT_WORK_DIR);
    fs::create_dir_all(&work_dir)?;

    let prepared = prepare_chapters(&chapters, &work_dir)?;
    debug!("{} of {} chapters have a title", prepared.len(), chapters.len());

    let failed = BuildResult {
        target: BuildTarget::Manuscript,
        success: false,
        artifact: artifact.clone(),
    };

    let Some(body) = convert_chapters(runner, log, &prepared, config.recto())? else {
        return Ok(failed);
    };

    let mut document = config.render_header();
    document.push('\n');
    document.push_str(&fields::document(&body));

    let tex = build_dir.join(&config.tex_filename);
    fs::write(&tex, document)?;
    debug!("Wrote {}", tex.display());

    let stage = lualatex_stage(&tex, &build_dir);
    if !run_stage(runner, log, &stage)? {
        return Ok(failed);
    }

    let Some(pdf) = stage.outputs().first() else {
        return Err(CoreError::OperationFailed(
            "lualatex stage declares no output".to_string(),
        ));
    };
    fs::copy(pdf, &artifact)?;
    log.finished()?;
    info!("Manuscript written to {}", artifact.display());

    Ok(BuildResult {
        target: BuildTarget::Manuscript,
        success: true,
        artifact,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockRunner;

    const CONFIG: &str = "\
tex_filename: novel.tex
metadata:
  title: The Long Road
  author: Jane Doe
chapterStyle:
  recto: true
";

    fn project(config: Option<&str>) -> (tempfile::TempDir, ProjectLayout) {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::rooted_at(tmp.path());
        fs::create_dir_all(layout.src_dir()).unwrap();
        fs::write(
            layout.src_dir().join("001-start.md"),
            "# Beginnings\n\nIt began.\n",
        )
        .unwrap();
        fs::write(
            layout.src_dir().join("002-end.md"),
            "# Endings\n\nIt ended.\n",
        )
        .unwrap();
        fs::write(layout.meta_json(), r#"{"ABBR_TITLE":"LongRoad"}"#).unwrap();
        if let Some(config) = config {
            fs::write(layout.manuscript_config(), config).unwrap();
        }
        (tmp, layout)
    }

    #[test]
    fn test_split_chapter_heading() {
        let (title, body) = split_chapter_heading("# One\n\nText here.\nMore.").unwrap();
        assert_eq!(title, "One");
        assert_eq!(body, "\nText here.\nMore.");

        let (title, body) = split_chapter_heading("Preface\n# Two\nBody").unwrap();
        assert_eq!(title, "Two");
        assert_eq!(body, "Preface\nBody");

        assert!(split_chapter_heading("## Not a chapter\ntext").is_none());
        assert!(split_chapter_heading("no heading").is_none());
    }

    #[test]
    fn test_config_load_and_recto() {
        let (_tmp, layout) = project(Some(CONFIG));
        let config = ManuscriptConfig::load(&layout.manuscript_config()).unwrap();
        assert_eq!(config.tex_filename, "novel.tex");
        assert!(config.recto());
        let header = config.render_header();
        assert!(header.starts_with("\\documentclass{novel}\n"));
        assert!(header.contains("\\SetTitle{The Long Road}"));
    }

    #[test]
    fn test_missing_config_is_configuration_error() {
        let (_tmp, layout) = project(None);
        let log = BuildLog::open(layout.log_file()).unwrap();
        let err = build_manuscript(&MockRunner::new(), &layout, &log).unwrap_err();
        assert!(matches!(err, CoreError::ManuscriptConfigNotFound(_)));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_invalid_config_is_parse_error() {
        let (_tmp, layout) = project(Some("metadata: [unclosed"));
        let err = ManuscriptConfig::load(&layout.manuscript_config()).unwrap_err();
        assert!(matches!(err, CoreError::ManuscriptConfigParse(..)));
    }

    #[test]
    fn test_lualatex_stage_arguments() {
        let stage = lualatex_stage(Path::new("build/novel.tex"), Path::new("build"));
        assert_eq!(
            stage.command_line(),
            "lualatex -interaction=nonstopmode --output-directory=build build/novel.tex"
        );
        assert_eq!(stage.outputs(), &[PathBuf::from("build/novel.pdf")]);
    }

    #[test]
    fn test_build_manuscript_success() {
        let (_tmp, layout) = project(Some(CONFIG));
        let log = BuildLog::open(layout.log_file()).unwrap();
        let runner = MockRunner::new().creating_outputs();

        let result = build_manuscript(&runner, &layout, &log).unwrap();

        assert!(result.success);
        assert_eq!(result.target, BuildTarget::Manuscript);
        assert_eq!(result.artifact, layout.bin_dir().join("LongRoad-manuscript.pdf"));
        assert!(result.artifact.exists());

        assert_eq!(runner.calls_named(CHAPTER_TO_LATEX_STAGE).len(), 2);
        assert!(runner.was_invoked(LUALATEX_STAGE));
        // lualatex only after every chapter conversion
        assert_eq!(runner.stage_names().last().map(String::as_str), Some(LUALATEX_STAGE));

        let tex = fs::read_to_string(layout.build_dir().join("novel.tex")).unwrap();
        let first = tex.find("\\ChapterTitle{Beginnings}").unwrap();
        let second = tex.find("\\ChapterTitle{Endings}").unwrap();
        assert!(first < second);
        assert!(tex.contains("\\cleartorecto"));
        assert!(tex.contains("\\begin{document}"));

        let body = fs::read_to_string(layout.build_dir().join("manuscript/001-start.md")).unwrap();
        assert!(!body.contains("# Beginnings"));
    }

    #[test]
    fn test_chapter_conversion_failure_skips_lualatex() {
        let (_tmp, layout) = project(Some(CONFIG));
        let log = BuildLog::open(layout.log_file()).unwrap();
        let runner = MockRunner::new().creating_outputs();
        runner.fail_stage(CHAPTER_TO_LATEX_STAGE, 1, "pandoc: parse error");

        let result = build_manuscript(&runner, &layout, &log).unwrap();

        assert!(!result.success);
        assert!(!runner.was_invoked(LUALATEX_STAGE));
        assert!(!result.artifact.exists());
    }

    #[test]
    fn test_lualatex_failure_reported() {
        let (_tmp, layout) = project(Some(CONFIG));
        let log = BuildLog::open(layout.log_file()).unwrap();
        let runner = MockRunner::new().creating_outputs();
        runner.fail_stage(LUALATEX_STAGE, 1, "! Undefined control sequence.");

        let result = build_manuscript(&runner, &layout, &log).unwrap();
        assert!(!result.success);
        let logged = fs::read_to_string(layout.log_file()).unwrap();
        assert!(logged.contains("Undefined control sequence"));
        assert!(!logged.contains("Finished successfully"));
    }

    #[test]
    fn test_chapter_without_heading_is_skipped() {
        let (_tmp, layout) = project(Some(CONFIG));
        fs::write(layout.src_dir().join("003-notes.md"), "just notes").unwrap();
        let log = BuildLog::open(layout.log_file()).unwrap();
        let runner = MockRunner::new().creating_outputs();

        let result = build_manuscript(&runner, &layout, &log).unwrap();
        assert!(result.success);
        assert_eq!(runner.calls_named(CHAPTER_TO_LATEX_STAGE).len(), 2);
    }
}
