// ============================================================================
// novel-core/src/manuscript/fields.rs
// ============================================================================
//
// LATEX HEADER FIELDS: Option Key -> Renderer Table for the `novel` Class
//
// The preamble is produced from an explicit, ordered table: sections in a
// fixed order, and inside each section a list of (option key, renderer)
// pairs. A renderer receives the YAML value for its key (or None when the
// key is absent) and returns the LaTeX line, or None to leave it out.
// Renderers with a documented default emit it when the value is absent.
//
// The table is data; swapping the document class or adding a field means
// editing HEADER_SECTIONS, not the build code.
//
// AI-ASSISTANT-INFO: Declarative LaTeX preamble renderers for the manuscript

use serde_yaml::Value;

/// Renders one option value into a LaTeX line.
pub type Renderer = fn(Option<&Value>) -> Option<String>;

/// One preamble section: the YAML section name and its ordered fields.
pub struct HeaderSection {
    pub name: &'static str,
    pub fields: &'static [(&'static str, Renderer)],
}

pub const DOCUMENT_CLASS: &str = "\\documentclass{novel}\n";

/// Preamble sections in output order.
pub const HEADER_SECTIONS: &[HeaderSection] = &[
    HeaderSection {
        name: "metadata",
        fields: &[
            ("title", render_title),
            ("subtitle", render_subtitle),
            ("author", render_author),
            ("application", render_application),
            ("producer", render_producer),
            ("PDFX", render_pdfx),
        ],
    },
    HeaderSection {
        name: "dimensions",
        fields: &[("trimSize", render_trim_size), ("margins", render_margins)],
    },
    HeaderSection {
        name: "fonts",
        fields: &[
            ("parentFont", render_parent_font),
            ("decoFont", render_deco_font),
            ("sansFont", render_sans_font),
            ("monoFont", render_mono_font),
            ("mathFont", render_math_font),
        ],
    },
    HeaderSection {
        name: "headerFooter",
        fields: &[
            ("headFootStyle", render_head_foot_style),
            ("headJump", render_head_jump),
            ("footJump", render_foot_jump),
            ("looseHead", render_loose_head),
            ("emblems", render_emblems),
            ("pageNumberStyle", render_page_number_style),
            ("versoHeadText", render_verso_head_text),
            ("rectoHeadText", render_recto_head_text),
        ],
    },
    HeaderSection {
        name: "chapterStyle",
        fields: &[
            ("chapterStartStyle", render_chapter_start_style),
            ("chapterStartHeight", render_chapter_start_height),
            ("sceneBreakIndent", render_scene_break_indent),
        ],
    },
    HeaderSection {
        name: "other",
        fields: &[
            ("defaultLanguage", render_default_language),
            ("microtype", render_microtype),
        ],
    },
];

// ============================================================================
// VALUE HELPERS
// ============================================================================

/// Scalar as text. Null, empty strings and collections count as absent.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_or(value: Option<&Value>, default: &str) -> String {
    text(value).unwrap_or_else(|| default.to_string())
}

/// Named member of a mapping value.
fn member<'a>(value: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    value?.as_mapping()?.get(key)
}

fn command(name: &str, value: Option<&Value>) -> Option<String> {
    text(value).map(|s| format!("\\{name}{{{s}}}"))
}

// ============================================================================
// METADATA
// ============================================================================

fn render_title(v: Option<&Value>) -> Option<String> {
    command("SetTitle", v)
}

fn render_subtitle(v: Option<&Value>) -> Option<String> {
    command("SetSubtitle", v)
}

fn render_author(v: Option<&Value>) -> Option<String> {
    command("SetAuthor", v)
}

fn render_application(v: Option<&Value>) -> Option<String> {
    Some(format!(
        "\\SetApplication{{{}}}",
        text_or(v, "LuaLaTeX with novel and microtype")
    ))
}

fn render_producer(v: Option<&Value>) -> Option<String> {
    Some(format!(
        "\\SetProducer{{{}}}",
        text_or(v, "LuaLaTeX with novel-pdfx and hyperref")
    ))
}

fn render_pdfx(v: Option<&Value>) -> Option<String> {
    Some(format!(
        "\\SetPDFX[{}]{{{}}}",
        text_or(member(v, "outputIntent"), "CGATSTR001"),
        text_or(member(v, "complianceStandard"), "X-1a:2001")
    ))
}

// ============================================================================
// DIMENSIONS
// ============================================================================

fn render_trim_size(v: Option<&Value>) -> Option<String> {
    let w = text(member(v, "w"))?;
    let h = text(member(v, "h"))?;
    Some(format!("\\SetTrimSize{{{w}}}{{{h}}}"))
}

fn render_margins(v: Option<&Value>) -> Option<String> {
    let top = text(member(v, "top"))?;
    let outer = text(member(v, "outer"))?;
    let bottom = text(member(v, "bottom"))?;
    let inner = text(member(v, "inner"))?;
    Some(format!("\\SetMargins{{{top}}}{{{outer}}}{{{bottom}}}{{{inner}}}"))
}

// ============================================================================
// FONTS
// ============================================================================

fn render_parent_font(v: Option<&Value>) -> Option<String> {
    let font = text(v)?;
    Some(format!(
        "\\SetParentFont[\nSmallCapsFeatures={{Renderer=Basic}},\nKerning=On,\nLigatures=TeX,\n]{{{font}}}"
    ))
}

fn render_deco_font(v: Option<&Value>) -> Option<String> {
    command("SetDecoFont", v)
}

fn render_sans_font(v: Option<&Value>) -> Option<String> {
    command("setsansfont", v)
}

fn render_mono_font(v: Option<&Value>) -> Option<String> {
    command("setmonofont", v)
}

fn render_math_font(v: Option<&Value>) -> Option<String> {
    command("setmathfont", v)
}

// ============================================================================
// HEADER / FOOTER
// ============================================================================

fn render_head_foot_style(v: Option<&Value>) -> Option<String> {
    Some(format!("\\SetHeadFootStyle{{{}}}", text_or(v, "1")))
}

fn render_head_jump(v: Option<&Value>) -> Option<String> {
    Some(format!("\\SetHeadJump{{{}}}", text_or(v, "1.5")))
}

fn render_foot_jump(v: Option<&Value>) -> Option<String> {
    Some(format!("\\SetFootJump{{{}}}", text_or(v, "1.5")))
}

fn render_loose_head(v: Option<&Value>) -> Option<String> {
    Some(format!("\\SetLooseHead{{{}}}", text_or(v, "50")))
}

/// Emblems sit between the page number and the binding.
fn render_emblems(v: Option<&Value>) -> Option<String> {
    let verso = text(member(v, "verso"))?;
    let recto = text(member(v, "recto"))?;
    Some(format!("\\SetEmblems{{{verso}}}{{{recto}}}"))
}

/// `pre`/`post` surround the page number; e.g. "-- " and " --" give "-- 1 --".
fn render_page_number_style(v: Option<&Value>) -> Option<String> {
    let pre = text(member(v, "pre")).unwrap_or_default();
    let post = text(member(v, "post")).unwrap_or_default();
    Some(format!("\\SetPageNumberStyle{{{pre}\\thepage{post}}}"))
}

fn render_verso_head_text(v: Option<&Value>) -> Option<String> {
    Some(format!("\\SetVersoHeadText{{{}}}", text_or(v, "\\theAuthor")))
}

fn render_recto_head_text(v: Option<&Value>) -> Option<String> {
    Some(format!("\\SetRectoHeadText{{{}}}", text_or(v, "\\theTitle")))
}

// ============================================================================
// CHAPTER STYLE
// ============================================================================

fn render_chapter_start_style(v: Option<&Value>) -> Option<String> {
    Some(format!("\\SetChapterStartStyle{{{}}}", text_or(v, "footer")))
}

fn render_chapter_start_height(v: Option<&Value>) -> Option<String> {
    Some(format!("\\SetChapterStartHeight{{{}}}", text_or(v, "10")))
}

fn render_scene_break_indent(v: Option<&Value>) -> Option<String> {
    let indent = v.and_then(Value::as_bool).unwrap_or(false);
    Some(format!("\\SetScenebreakIndent{{{indent}}}"))
}

// ============================================================================
// OTHER
// ============================================================================

fn render_default_language(v: Option<&Value>) -> Option<String> {
    let lang = text(member(v, "lang"))?;
    let variant = text(member(v, "variant"))
        .map(|variant| format!("[variant={variant}]"))
        .unwrap_or_default();
    Some(format!("\\setdefaultlanguage{variant}{{{lang}}}"))
}

fn render_microtype(v: Option<&Value>) -> Option<String> {
    Some(format!(
        "\\microtypesetup{{config={},stretch={},shrink={},final}}",
        text_or(member(v, "config"), "novel-microtype"),
        text_or(member(v, "stretch"), "20"),
        text_or(member(v, "shrink"), "20")
    ))
}

// ============================================================================
// DOCUMENT TEMPLATES
// ============================================================================

/// Renders the whole preamble: document class, then every section's fields
/// in table order, one per line.
///
/// `section` looks up a section mapping by name; missing sections render
/// with every value absent.
pub fn render_header<'a, F>(section: F) -> String
where
    F: Fn(&str) -> Option<&'a serde_yaml::Mapping>,
{
    let mut header = String::from(DOCUMENT_CLASS);
    for header_section in HEADER_SECTIONS {
        let values = section(header_section.name);
        for (key, render) in header_section.fields {
            if let Some(line) = render(values.and_then(|m| m.get(*key))) {
                header.push_str(&line);
                header.push('\n');
            }
        }
    }
    header
}

/// Wraps the chapters in the document environment.
#[must_use]
pub fn document(inner: &str) -> String {
    format!("\n\\begin{{document}}\n{inner}\n\\end{{document}}\n")
}

/// One chapter: title block, body, then a page break that lands on a recto
/// page when `recto` is set.
#[must_use]
pub fn chapter(title: &str, recto: bool, body: &str) -> String {
    let clear = if recto { "\\cleartorecto" } else { "\\clearpage" };
    format!(
        "\n\\begin{{ChapterStart}}\n\\ChapterTitle{{{title}}}\n\\end{{ChapterStart}}\n{body}\n{clear}\n"
    )
}
