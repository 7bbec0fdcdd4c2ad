// ============================================================================
// novel-core/src/build_log.rs
// ============================================================================
//
// BUILD LOG: Append-Only Diagnostic Log Shared by Concurrent Stages
//
// Every external tool's combined stdout/stderr is written here instead of to
// the console. Stages that run at the same time (the paperback text chain and
// the frontmatter render) write through the same handle, so each append takes
// a mutex and writes a complete chunk. The file is opened in append mode and
// never truncated by this crate.
//
// AI-ASSISTANT-INFO: Shared append-only log file for subprocess output

// ---- Internal crate imports ----
use crate::error::CoreResult;

// ---- Standard library imports ----
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Append-only log file, safe to share between threads.
#[derive(Debug)]
pub struct BuildLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl BuildLog {
    /// Opens (creating if needed) the log file at `path` for appending.
    ///
    /// The parent directory is created when missing.
    pub fn open(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Path of the underlying log file, used in user-facing failure messages.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `text` verbatim as a single write.
    pub fn append(&self, text: &str) -> io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(text.as_bytes())?;
        file.flush()
    }

    /// Appends `line` followed by a newline.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut chunk = String::with_capacity(line.len() + 1);
        chunk.push_str(line);
        chunk.push('\n');
        self.append(&chunk)
    }

    /// Writes the `[[FORMAT]] <date> <time>` header that opens a build.
    pub fn begin(&self, format: &str) -> io::Result<()> {
        let now = chrono::Local::now();
        self.append(&format!(
            "\n[[{}]] {} {}\n",
            format,
            now.format("%Y-%m-%d"),
            now.format("%H:%M:%S")
        ))
    }

    /// Records a successful build step.
    pub fn finished(&self) -> io::Result<()> {
        self.append_line("Finished successfully")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_open_creates_parent_and_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("build").join("build.log");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "existing\n").unwrap();

        let log = BuildLog::open(&path).unwrap();
        log.append_line("new line").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "existing\nnew line\n");
    }

    #[test]
    fn test_begin_writes_format_header() {
        let tmp = tempfile::tempdir().unwrap();
        let log = BuildLog::open(tmp.path().join("nested/build.log")).unwrap();
        log.begin("PAPERBACK").unwrap();
        log.finished().unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert!(content.starts_with("\n[[PAPERBACK]] "));
        assert!(content.ends_with("Finished successfully\n"));
    }

    #[test]
    fn test_concurrent_writers_keep_lines_whole() {
        let tmp = tempfile::tempdir().unwrap();
        let log = Arc::new(BuildLog::open(tmp.path().join("build.log")).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for i in 0..50 {
                        log.append_line(&format!("worker-{worker} line-{i}")).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 200);
        assert!(lines.iter().all(|l| l.starts_with("worker-") && l.contains(" line-")));
    }
}
