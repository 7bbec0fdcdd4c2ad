// ============================================================================
// novel-core/src/scaffold.rs
// ============================================================================
//
// PROJECT SCAFFOLDING: meta.json and Templated Starter Files
//
// `init` gathers a `ProjectMetadata` interactively (CLI side) and hands it
// here. The starter HTML, CSS and EPUB metadata files are compiled into the
// binary and filled by replacing every `{{KEY}}` placeholder.
//
// AI-ASSISTANT-INFO: Writes meta.json and the starter project files

// ---- Internal crate imports ----
use crate::config::ProjectLayout;
use crate::error::CoreResult;
use crate::metadata::ProjectMetadata;

// ---- External crate imports ----
use log::debug;

// ---- Standard library imports ----
use std::fs;
use std::path::PathBuf;

/// Where a starter file goes, relative to the project layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Html(&'static str),
    Css(&'static str),
    EpubMetadata,
}

/// Starter files in the order they are written.
const TEMPLATES: &[(Destination, &str)] = &[
    (
        Destination::Html("manuscript_title.html"),
        include_str!("../templates/manuscript_title.html"),
    ),
    (
        Destination::Html("paperback_frontmatter.html"),
        include_str!("../templates/paperback_frontmatter.html"),
    ),
    (
        Destination::Css("manuscript.css"),
        include_str!("../templates/manuscript.css"),
    ),
    (
        Destination::Css("paperback.css"),
        include_str!("../templates/paperback.css"),
    ),
    (
        Destination::Css("manuscript_title.css"),
        include_str!("../templates/manuscript_title.css"),
    ),
    (
        Destination::Css("paperback_frontmatter.css"),
        include_str!("../templates/paperback_frontmatter.css"),
    ),
    (Destination::EpubMetadata, include_str!("../templates/epub.yml")),
];

impl Destination {
    fn resolve(self, layout: &ProjectLayout) -> PathBuf {
        match self {
            Self::Html(name) => layout.html_dir().join(name),
            Self::Css(name) => layout.css_dir().join(name),
            Self::EpubMetadata => layout.epub_metadata(),
        }
    }
}

/// Replaces every `{{KEY}}` in `template` with its value.
///
/// Keys not listed are left untouched.
#[must_use]
pub fn render_template(template: &str, placeholders: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (key, value) in placeholders {
        rendered = rendered.replace(&format!("{{{{{key}}}}}"), value);
    }
    rendered
}

/// Writes `meta.json` and every starter file for `metadata`.
///
/// Returns the paths written, `meta.json` first. Existing files are
/// overwritten.
pub fn scaffold_project(
    layout: &ProjectLayout,
    metadata: &ProjectMetadata,
) -> CoreResult<Vec<PathBuf>> {
    fs::create_dir_all(layout.html_dir())?;
    fs::create_dir_all(layout.css_dir())?;

    let mut written = Vec::with_capacity(TEMPLATES.len() + 1);

    let meta_json = layout.meta_json();
    metadata.save(&meta_json)?;
    written.push(meta_json);

    let surname_upper = metadata.surname.to_uppercase();
    let mut placeholders = metadata.placeholders();
    placeholders.push(("SURNAME_UPPER", surname_upper.as_str()));

    for (destination, template) in TEMPLATES {
        let path = destination.resolve(layout);
        fs::write(&path, render_template(template, &placeholders))?;
        debug!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}
