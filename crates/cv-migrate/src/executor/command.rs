//! External-program artifact executor.

use super::MigrationExecutor;
use crate::error::ExecutionFailure;
use std::path::Path;
use std::process::{Command, Stdio};

/// Runs `<interpreter...> <artifact>` and treats exit status 0 as success.
///
/// The working directory is the artifact's directory. Stdin is closed and
/// stderr is captured into the failure.
pub struct CommandExecutor {
    program: String,
    args: Vec<String>,
}

impl CommandExecutor {
    /// Build from an interpreter list such as `["bash", "-e"]`.
    ///
    /// Returns `None` when the list is empty.
    pub fn new(interpreter: &[String]) -> Option<Self> {
        let (program, args) = interpreter.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl MigrationExecutor for CommandExecutor {
    fn execute(&self, path: &Path) -> Result<(), ExecutionFailure> {
        let display = path.display().to_string();
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // Relative artifact paths would not survive the directory change.
        match (path.parent().filter(|d| !d.as_os_str().is_empty()), path.file_name()) {
            (Some(dir), Some(file)) => {
                command.current_dir(dir).arg(file);
            }
            _ => {
                command.arg(path);
            }
        }

        let output = command.output().map_err(|e| ExecutionFailure::Spawn {
            program: self.program.clone(),
            path: display.clone(),
            source: e,
        })?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
                log::debug!("[{display}] {line}");
            }
            Ok(())
        } else {
            Err(ExecutionFailure::Command {
                path: display,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

#[cfg(all(test, unix))]
#[path = "command_test.rs"]
mod tests;
