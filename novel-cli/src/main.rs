// novel-cli/src/main.rs
//
// Entry point for the `novel-builder` binary. All logic lives in the
// library; this wires it to the real process environment.

use novel_cli::error::EXIT_FAILURE;
use novel_core::SystemRunner;
use std::process;

fn main() {
    let code = match std::env::current_dir() {
        Ok(cwd) => {
            let cwd = novel_cli::working_directory(std::env::var_os("PWD"), cwd);
            novel_cli::run(std::env::args_os(), &cwd, &SystemRunner)
        }
        Err(e) => {
            eprintln!("Error: cannot determine the current directory: {e}");
            EXIT_FAILURE
        }
    };
    process::exit(code);
}
