use std::path::PathBuf;
use std::process::{Command as Process, Stdio};

use crate::domain::Command;
use crate::error::{GitxError, Result};
use crate::git::CommandExecutor;
use crate::ui;

/// Runs commands as child processes, streaming their output to the terminal
#[derive(Debug, Default)]
pub struct ShellExecutor {
    working_dir: Option<PathBuf>,
}

impl ShellExecutor {
    pub fn new() -> Self {
        ShellExecutor::default()
    }

    /// Run every command from `dir` instead of the process working directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        ShellExecutor {
            working_dir: Some(dir.into()),
        }
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute(&self, command: &Command) -> Result<()> {
        ui::display_command(command);

        let mut process = Process::new(&command.program);
        process
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.working_dir {
            process.current_dir(dir);
        }

        let status = process
            .status()
            .map_err(|e| GitxError::vcs(command, format!("could not start: {}", e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(GitxError::vcs(command, status.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_a_vcs_failure() {
        let executor = ShellExecutor::new();
        let command = Command::new("gitx-no-such-program", ["status"]);
        let err = executor.execute(&command).unwrap_err();
        assert!(matches!(err, GitxError::Vcs { .. }));
        assert!(err.to_string().contains("gitx-no-such-program status"));
    }
}
