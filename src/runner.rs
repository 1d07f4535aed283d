//! Sequential command execution with an audit log.
//!
//! The runner hands commands to its executor strictly in submission order. Every command is
//! appended to the log before it runs, so after a failure the log ends with the command
//! that failed.

use log::{debug, warn};

use crate::domain::{Command, Policy};
use crate::error::Result;
use crate::git::CommandExecutor;
use crate::warning::WorkflowWarning;

pub struct CommandRunner<'a> {
    executor: &'a dyn CommandExecutor,
    log: Vec<Command>,
    warnings: Vec<WorkflowWarning>,
}

impl<'a> CommandRunner<'a> {
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        CommandRunner {
            executor,
            log: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Run under the strict policy: a failure aborts the caller's sequence.
    pub fn run(&mut self, command: Command) -> Result<()> {
        self.run_with(command, Policy::Strict)
    }

    /// Run under the tolerant policy: a failure becomes a warning.
    pub fn run_tolerant(&mut self, command: Command) -> Result<()> {
        self.run_with(command, Policy::Tolerant)
    }

    pub fn run_with(&mut self, command: Command, policy: Policy) -> Result<()> {
        debug!("running `{}` ({:?})", command, policy);
        self.log.push(command);
        let command = &self.log[self.log.len() - 1];

        match self.executor.execute(command) {
            Ok(()) => Ok(()),
            Err(err) if policy == Policy::Tolerant => {
                warn!("ignoring failure of `{}`: {}", command, err);
                self.warnings.push(WorkflowWarning::ToleratedFailure {
                    command: command.to_string(),
                    reason: err.to_string(),
                });
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Every command issued so far
    pub fn log(&self) -> &[Command] {
        &self.log
    }

    /// Position to pass to [`CommandRunner::since`]
    pub fn mark(&self) -> usize {
        self.log.len()
    }

    /// Commands issued after `mark`
    pub fn since(&self, mark: usize) -> &[Command] {
        &self.log[mark.min(self.log.len())..]
    }

    /// Keep a non-fatal condition raised by an engine alongside the runner's own
    pub fn record_warning(&mut self, warning: WorkflowWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[WorkflowWarning] {
        &self.warnings
    }

    /// Drains the warnings collected so far
    pub fn take_warnings(&mut self) -> Vec<WorkflowWarning> {
        std::mem::take(&mut self.warnings)
    }
}
