// ============================================================================
// novel-core/src/metadata.rs
// ============================================================================
//
// PROJECT METADATA: The meta.json Record Written by `init`
//
// Holds the book's identifying fields (title, author, publisher, contact
// details). The builds only need the abbreviated title, which names every
// output artifact; scaffolding uses the full record to fill templates.
//
// AI-ASSISTANT-INFO: Project metadata model, persistence and defaults

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};
use crate::utils::sanitize;

// ---- External crate imports ----
use serde::{Deserialize, Serialize};

// ---- Standard library imports ----
use std::io;
use std::path::Path;

/// Book project metadata, stored as JSON with upper-case keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct ProjectMetadata {
    pub title: String,
    /// Short, filename-safe identifier used to name output artifacts
    pub abbr_title: String,
    /// Subtitle; may be empty
    #[serde(rename = "SUB")]
    pub subtitle: String,
    pub author: String,
    /// Pen name; defaults to the author
    pub pen: String,
    /// Author's surname for the manuscript header
    pub surname: String,
    /// Copyright holder; defaults to the author
    pub copyright: String,
    pub year: String,
    /// Publisher; defaults to the author
    pub publisher: String,
    #[serde(rename = "ADDR_1")]
    pub addr_1: String,
    #[serde(rename = "ADDR_2")]
    pub addr_2: String,
    pub phone: String,
    pub email: String,
    pub url: String,
}

impl ProjectMetadata {
    /// Loads the metadata file.
    ///
    /// A missing file is reported as `MetadataNotFound` so the CLI can tell the
    /// user to run `init`.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CoreError::MetadataNotFound(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        serde_json::from_str(&raw).map_err(|e| CoreError::MetadataParse(path.to_path_buf(), e))
    }

    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Fills empty optional fields the way `init` documents them.
    ///
    /// Pen name, copyright holder and publisher fall back to the author. The
    /// abbreviated title falls back to the author as well and is always
    /// sanitized, since it becomes part of file names.
    pub fn apply_defaults(&mut self) {
        if self.pen.is_empty() {
            self.pen = self.author.clone();
        }
        if self.copyright.is_empty() {
            self.copyright = self.author.clone();
        }
        if self.publisher.is_empty() {
            self.publisher = self.author.clone();
        }
        self.abbr_title = if self.abbr_title.is_empty() {
            sanitize(&self.author)
        } else {
            sanitize(&self.abbr_title)
        };
    }

    /// Template placeholder keys paired with their values, in a fixed order.
    #[must_use]
    pub fn placeholders(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("TITLE", self.title.as_str()),
            ("ABBR_TITLE", self.abbr_title.as_str()),
            ("SUB", self.subtitle.as_str()),
            ("AUTHOR", self.author.as_str()),
            ("PEN", self.pen.as_str()),
            ("SURNAME", self.surname.as_str()),
            ("COPYRIGHT", self.copyright.as_str()),
            ("YEAR", self.year.as_str()),
            ("PUBLISHER", self.publisher.as_str()),
            ("ADDR_1", self.addr_1.as_str()),
            ("ADDR_2", self.addr_2.as_str()),
            ("PHONE", self.phone.as_str()),
            ("EMAIL", self.email.as_str()),
            ("URL", self.url.as_str()),
        ]
    }
}

/// Reads only the abbreviated title from the metadata file.
pub fn load_abbr_title(path: &Path) -> CoreResult<String> {
    let metadata = ProjectMetadata::load(path)?;
    if metadata.abbr_title.is_empty() {
        return Err(CoreError::OperationFailed(format!(
            "ABBR_TITLE is empty in {}",
            path.display()
        )));
    }
    Ok(metadata.abbr_title)
}
