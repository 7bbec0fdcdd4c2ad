//! `clean`: removes the build directory.

use crate::error::CliResult;
use crate::terminal;
use novel_core::{ProjectLayout, clean_build_dir};

pub fn run(layout: &ProjectLayout) -> CliResult<()> {
    let build_dir = layout.build_dir();
    if clean_build_dir(layout)? {
        terminal::print_success(&format!("Removed {}", build_dir.display()));
    } else {
        terminal::print_step(&format!("Nothing to clean at {}", build_dir.display()));
    }
    Ok(())
}
