// novel-core/src/external/runner.rs
//
// Production `CommandRunner`: spawns the stage with piped stdout/stderr,
// drains both pipes on reader threads into one channel, and appends each line
// to the build log as it arrives. Interleaving between the two streams is
// best-effort; every line of both is captured.

use super::{CommandRunner, Stage, StageOutcome};
use crate::build_log::BuildLog;
use crate::error::{CoreError, CoreResult, command_start_error};

use log::{debug, info, warn};
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

/// Runs stages as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, stage: &Stage, log: &BuildLog) -> CoreResult<StageOutcome> {
        info!("Running stage '{}' ({})", stage.name(), stage.program());
        debug!("Command line: {}", stage.command_line());

        let mut child = Command::new(stage.program())
            .args(stage.get_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| command_start_error(stage.program(), e))?;

        let stdout = child.stdout.take().ok_or_else(|| {
            CoreError::OperationFailed(format!("stdout of '{}' was not captured", stage.program()))
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            CoreError::OperationFailed(format!("stderr of '{}' was not captured", stage.program()))
        })?;

        let (tx, rx) = mpsc::channel();
        let stdout_handle = spawn_line_reader(stdout, tx.clone());
        let stderr_handle = spawn_line_reader(stderr, tx);

        // Ends once both readers hit EOF and drop their senders.
        let mut combined = String::new();
        for line in rx {
            if let Err(e) = log.append_line(&line) {
                warn!("Failed to write to {}: {}", log.path().display(), e);
            }
            combined.push_str(&line);
            combined.push('\n');
        }

        for handle in [stdout_handle, stderr_handle] {
            if handle.join().is_err() {
                warn!("Output reader for '{}' panicked", stage.program());
            }
        }

        let status = child
            .wait()
            .map_err(|e| CoreError::CommandWait(stage.program().to_string(), e))?;

        if status.success() {
            debug!("Stage '{}' finished successfully", stage.name());
            Ok(StageOutcome::succeeded(combined))
        } else {
            warn!("Stage '{}' failed: {}", stage.name(), status);
            Ok(StageOutcome::failed(status.code(), combined))
        }
    }
}

/// Forwards each line read from `reader` to `tx` until EOF.
///
/// Bytes are decoded lossily so tools emitting non-UTF-8 output still have
/// it captured.
fn spawn_line_reader<R>(reader: R, tx: Sender<String>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf)
                        .trim_end_matches(['\n', '\r'])
                        .to_string();
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Error reading process output: {}", e);
                    break;
                }
            }
        }
    })
}
