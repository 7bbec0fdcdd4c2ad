//! `wc`: word count per chapter, grand total and reading time.

use crate::error::CliResult;
use novel_core::{ProjectLayout, WordCountReport, word_count};

/// Counts the project's chapters and prints the report.
pub fn run(layout: &ProjectLayout) -> CliResult<WordCountReport> {
    let report = word_count(&layout.src_dir())?;
    println!("{report}");
    Ok(report)
}
