//! Promoting a feature branch to production.

use crate::domain::{backport_name, Command};
use crate::error::Result;
use crate::messaging::Message;
use crate::workflow::{CleanupReport, Workflow};

const RETENTION_ADVICE: &str = "You should retain the branch for backporting if\n\
\t* It aims to fix some kind of problem with functionality already released\n\
\t* You have been instructed to retain this branch\n\
\t* You're not sure (better safe than sorry!)";

#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// The operator declined; nothing was run
    Declined,
    Released {
        /// Name of the retained backport branch, if any
        backport: Option<String>,
        cleanup: CleanupReport,
        commands: Vec<Command>,
    },
}

impl<'a> Workflow<'a> {
    /// Release `branch`: merge it into base, cascade base into staging, then clean up.
    ///
    /// Protected branches are rejected before the operator is asked anything.
    pub fn release_branch(&mut self, branch: &str) -> Result<ReleaseOutcome> {
        self.classifier.assert_not_protected(branch, "release")?;

        if !self
            .operator
            .confirm(&format!("Release {} to production?", branch))?
        {
            return Ok(ReleaseOutcome::Declined);
        }

        let (remote, base) = (self.remote(), self.base());
        let staging = self.classifier.staging().to_string();
        let mark = self.runner.mark();

        self.operator.say(RETENTION_ADVICE);
        let backport = if self
            .operator
            .confirm(&format!("Retain a copy of {} for backporting?", branch))?
        {
            let backport = backport_name(branch);
            self.runner
                .run(Command::push_as(remote, branch, &backport))?;
            Some(backport)
        } else {
            None
        };

        self.refresh_branch(branch)?;
        self.integrate_branch(branch, base)?;
        self.integrate_branch(base, &staging)?;
        let cleanup = self.cleanup()?;
        let commands = self.runner.since(mark).to_vec();

        self.post(Message::new(format!(
            "#worklog releasing {} to production",
            branch
        )))?;

        Ok(ReleaseOutcome::Released {
            backport,
            cleanup,
            commands,
        })
    }
}
