//! Word count statistics.
//!
//! Counts whitespace-separated words per chapter, a grand total, and an
//! estimated reading time at a fixed reading speed.

use crate::config::WORDS_PER_MINUTE;
use crate::discovery::{chapter_name, list_chapter_files};
use crate::error::CoreResult;
use crate::utils::format_count;

use std::fmt;
use std::path::Path;

/// Reading time split into hours and minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingTime {
    pub hours: usize,
    pub minutes: usize,
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours == 0 {
            write!(f, "{}m", self.minutes)
        } else {
            write!(f, "{}h {}m", self.hours, self.minutes)
        }
    }
}

/// Estimates reading time for `words` words.
///
/// Minutes are `words / 250` rounded to the nearest whole minute, halves
/// rounding up, so anything under 125 words reads in `0m`.
#[must_use]
pub fn estimate_reading_time(words: usize) -> ReadingTime {
    let total_minutes = (words as f64 / WORDS_PER_MINUTE as f64).round() as usize;
    ReadingTime {
        hours: total_minutes / 60,
        minutes: total_minutes % 60,
    }
}

/// Number of non-empty whitespace-separated tokens in `text`.
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Word count of a single chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterCount {
    /// Chapter file name without the `.md` extension
    pub name: String,
    pub words: usize,
}

/// Per-chapter counts in chapter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCountReport {
    pub chapters: Vec<ChapterCount>,
}

impl WordCountReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.chapters.iter().map(|c| c.words).sum()
    }

    #[must_use]
    pub fn reading_time(&self) -> ReadingTime {
        estimate_reading_time(self.total())
    }
}

fn words_label(n: usize) -> String {
    let noun = if n == 1 { "word" } else { "words" };
    format!("{} {noun}", format_count(n))
}

impl fmt::Display for WordCountReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Word Count:")?;
        for chapter in &self.chapters {
            writeln!(
                f,
                "  {}: {} ({})",
                chapter.name,
                words_label(chapter.words),
                estimate_reading_time(chapter.words)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "  Grand Total: {}", words_label(self.total()))?;
        write!(f, "  Reading Time: {}", self.reading_time())
    }
}

/// Counts the words of every chapter in `source_dir`, in chapter order.
pub fn word_count(source_dir: &Path) -> CoreResult<WordCountReport> {
    let mut chapters = Vec::new();
    for path in list_chapter_files(source_dir)? {
        let content = std::fs::read_to_string(&path)?;
        chapters.push(ChapterCount {
            name: chapter_name(&path),
            words: count_words(&content),
        });
    }
    Ok(WordCountReport { chapters })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("Hello world"), 2);
        assert_eq!(count_words("  leading\n\ntrailing  \t"), 2);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("# Chapter One\n\nIt was a dark night."), 8);
    }

    #[test]
    fn test_estimate_reading_time_rounding() {
        assert_eq!(estimate_reading_time(3).to_string(), "0m");
        assert_eq!(estimate_reading_time(124).to_string(), "0m");
        assert_eq!(estimate_reading_time(125).to_string(), "1m");
        assert_eq!(estimate_reading_time(250).to_string(), "1m");
        assert_eq!(estimate_reading_time(15_000).to_string(), "1h 0m");
        assert_eq!(estimate_reading_time(90_000).to_string(), "6h 0m");
        assert_eq!(estimate_reading_time(20_000).to_string(), "1h 20m");
    }

    #[test]
    fn test_report_display() {
        let report = WordCountReport {
            chapters: vec![
                ChapterCount { name: "001-intro".into(), words: 2 },
                ChapterCount { name: "002-end".into(), words: 1 },
            ],
        };
        let text = report.to_string();
        assert!(text.contains("001-intro: 2 words"));
        assert!(text.contains("002-end: 1 word ("));
        assert!(text.contains("Grand Total: 3 words"));
        assert!(text.ends_with("Reading Time: 0m"));
    }

    #[test]
    fn test_large_counts_use_separators() {
        let report = WordCountReport {
            chapters: vec![ChapterCount { name: "001".into(), words: 54_321 }],
        };
        assert!(report.to_string().contains("Grand Total: 54,321 words"));
        assert_eq!(report.reading_time().to_string(), "3h 37m");
    }
}
