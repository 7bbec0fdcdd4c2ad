// novel-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

use super::{CommandRunner, Stage, StageOutcome};
use crate::build_log::BuildLog;
use crate::error::{CoreError, CoreResult};

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Scripted behaviour for stages with a given name.
#[derive(Debug, Clone)]
enum Scripted {
    ExitWith(i32, String),
    MissingTool,
}

/// Recording `CommandRunner` that never spawns anything.
///
/// Every stage succeeds unless scripted otherwise by name. With
/// [`MockRunner::creating_outputs`], declared outputs of successful stages are
/// written as small placeholder files so later stages can read them.
#[derive(Debug, Default)]
pub struct MockRunner {
    scripted: Mutex<HashMap<String, Scripted>>,
    received_calls: Mutex<Vec<Stage>>,
    create_outputs: bool,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes successful stages write placeholder files for their outputs.
    #[must_use]
    pub fn creating_outputs(mut self) -> Self {
        self.create_outputs = true;
        self
    }

    /// Stages named `name` exit with `exit_code` and print `message`.
    pub fn fail_stage(&self, name: &str, exit_code: i32, message: &str) {
        self.scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), Scripted::ExitWith(exit_code, message.to_string()));
    }

    /// Stages named `name` behave as if their program is not installed.
    pub fn missing_tool(&self, name: &str) {
        self.scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), Scripted::MissingTool);
    }

    /// All stages received so far, in invocation order.
    pub fn get_received_calls(&self) -> Vec<Stage> {
        self.received_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Names of the stages received so far, in invocation order.
    pub fn stage_names(&self) -> Vec<String> {
        self.get_received_calls()
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    pub fn calls_named(&self, name: &str) -> Vec<Stage> {
        self.get_received_calls()
            .into_iter()
            .filter(|s| s.name() == name)
            .collect()
    }

    pub fn was_invoked(&self, name: &str) -> bool {
        !self.calls_named(name).is_empty()
    }

    fn write_placeholder_outputs(stage: &Stage) {
        for output in stage.outputs() {
            if let Some(parent) = output.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    log::error!("MockRunner failed to create {}: {}", parent.display(), e);
                    continue;
                }
            }
            let content = format!("mock output of {}\n", stage.name());
            match std::fs::write(output, content) {
                Ok(()) => log::debug!("MockRunner created {}", output.display()),
                Err(e) => log::error!("MockRunner failed to write {}: {}", output.display(), e),
            }
        }
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, stage: &Stage, log: &BuildLog) -> CoreResult<StageOutcome> {
        self.received_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(stage.clone());

        let scripted = self
            .scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(stage.name())
            .cloned();

        match scripted {
            Some(Scripted::MissingTool) => {
                log::warn!("MockRunner simulating missing tool for '{}'", stage.name());
                Err(CoreError::DependencyNotFound(stage.program().to_string()))
            }
            Some(Scripted::ExitWith(code, message)) => {
                log.append_line(&message)?;
                Ok(StageOutcome::failed(Some(code), format!("{message}\n")))
            }
            None => {
                if self.create_outputs {
                    Self::write_placeholder_outputs(stage);
                }
                let line = format!("mock: {}", stage.command_line());
                log.append_line(&line)?;
                Ok(StageOutcome::succeeded(format!("{line}\n")))
            }
        }
    }
}
