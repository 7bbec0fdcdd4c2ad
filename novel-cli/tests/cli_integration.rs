use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

// Helper function to get the path to the compiled binary
fn novel_builder_cmd() -> Command {
    Command::cargo_bin("novel-builder").expect("Failed to find novel-builder binary")
}

/// A project with two chapters and the tool directory inside it.
fn sample_project() -> Result<(TempDir, PathBuf), Box<dyn Error>> {
    let root = tempdir()?;
    let tool_dir = root.path().join("novel-builder");
    fs::create_dir_all(&tool_dir)?;
    fs::create_dir_all(root.path().join("src"))?;
    fs::write(root.path().join("src").join("001-intro.md"), "Hello world")?;
    fs::write(root.path().join("src").join("002-end.md"), "Goodbye")?;
    Ok((root, tool_dir))
}

fn run_in(dir: &Path) -> Command {
    let mut cmd = novel_builder_cmd();
    cmd.current_dir(dir);
    cmd
}

#[test]
fn test_unrecognized_command_prints_usage() -> Result<(), Box<dyn Error>> {
    let (_root, tool_dir) = sample_project()?;

    run_in(&tool_dir)
        .arg("foo")
        .assert()
        .code(1)
        .stdout(contains("Usage: novel-builder"));

    Ok(())
}

#[test]
fn test_missing_command_prints_usage() -> Result<(), Box<dyn Error>> {
    let (_root, tool_dir) = sample_project()?;

    run_in(&tool_dir)
        .assert()
        .code(1)
        .stdout(contains("COMMAND must be one of"));

    Ok(())
}

#[test]
fn test_help_exits_zero() -> Result<(), Box<dyn Error>> {
    let (_root, tool_dir) = sample_project()?;

    run_in(&tool_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Novel Builder v3.0.0"))
        .stdout(contains("Usage: novel-builder"));

    Ok(())
}

#[test]
fn test_version_exits_zero() -> Result<(), Box<dyn Error>> {
    let (_root, tool_dir) = sample_project()?;

    run_in(&tool_dir)
        .arg("-v")
        .assert()
        .success()
        .stdout(contains("novel-builder v3.0.0"));

    Ok(())
}

#[test]
fn test_word_count() -> Result<(), Box<dyn Error>> {
    let (_root, tool_dir) = sample_project()?;

    run_in(&tool_dir)
        .arg("wc")
        .assert()
        .success()
        .stdout(contains("001-intro: 2 words"))
        .stdout(contains("002-end: 1 word"))
        .stdout(contains("Grand Total: 3 words"))
        .stdout(contains("Reading Time: 0m"));

    Ok(())
}

#[test]
fn test_clean_removes_build_dir() -> Result<(), Box<dyn Error>> {
    let (root, tool_dir) = sample_project()?;
    fs::create_dir_all(root.path().join("build"))?;
    fs::write(root.path().join("build").join("build.log"), "old")?;

    run_in(&tool_dir).arg("clean").assert().success();
    assert!(!root.path().join("build").exists());

    Ok(())
}

#[test]
fn test_paperback_without_metadata_fails() -> Result<(), Box<dyn Error>> {
    let (_root, tool_dir) = sample_project()?;

    run_in(&tool_dir)
        .arg("paperback")
        .assert()
        .code(1)
        .stderr(contains("meta.json"));

    Ok(())
}

#[test]
fn test_wrong_directory_is_rejected() -> Result<(), Box<dyn Error>> {
    let (root, _tool_dir) = sample_project()?;

    run_in(root.path())
        .arg("wc")
        .assert()
        .code(1)
        .stderr(contains("must be run from inside its own directory"));

    Ok(())
}
