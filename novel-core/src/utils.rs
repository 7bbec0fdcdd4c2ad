//! Utility functions for formatting and file operations.
//!
//! This module provides general-purpose helpers used throughout the
//! novel-core library: number formatting for reports, the filename
//! sanitizer applied to abbreviated titles, and build directory cleanup.

use crate::config::ProjectLayout;
use crate::error::CoreResult;

/// Characters stripped from abbreviated titles.
const SANITIZE_STRIP: &[char] = &[
    '~', '`', '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '=', '+', '[', '{', ']',
    '}', '"', '\'', ',', '\\', '|', ';', ':', '<', '.', '>', '/', '?',
];

/// Makes `input` safe to embed in a file name.
///
/// Removes all whitespace and the punctuation characters in `SANITIZE_STRIP`.
/// Hyphens and alphanumerics are kept.
///
/// ```rust
/// assert_eq!(novel_core::utils::sanitize(" The Long, Dark Road? "), "TheLongDarkRoad");
/// ```
#[must_use]
pub fn sanitize(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && !SANITIZE_STRIP.contains(c))
        .collect()
}

/// Formats a count with comma thousands separators (e.g., 12345 -> "12,345").
#[must_use]
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Removes the build directory and everything in it.
///
/// Returns `true` if a directory was removed, `false` if there was nothing to
/// clean. The bin directory with finished artifacts is left alone.
pub fn clean_build_dir(layout: &ProjectLayout) -> CoreResult<bool> {
    let build_dir = layout.build_dir();
    if !build_dir.exists() {
        log::debug!("Nothing to clean at {}", build_dir.display());
        return Ok(false);
    }
    std::fs::remove_dir_all(&build_dir)?;
    log::info!("Removed {}", build_dir.display());
    Ok(true)
}
