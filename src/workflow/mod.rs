//! Workflow entry points
//!
//! One method per verb of the command line. Each validates its arguments through the
//! [BranchClassifier] before any command is issued, then drives the engines in
//! [integrate], [reset], [release] and [cleanup].

pub mod cleanup;
pub mod integrate;
pub mod release;
pub mod reset;

pub use cleanup::CleanupReport;
pub use release::ReleaseOutcome;
pub use reset::NukeReport;

use crate::config::Config;
use crate::domain::{snapshot_name, validate_branch_name, BranchClassifier, Command};
use crate::error::{GitxError, Result};
use crate::git::{BranchQuery, CommandExecutor, Repository};
use crate::messaging::{Message, Messenger};
use crate::review::{ReviewRequester, PULL_REQUEST_TEMPLATE};
use crate::runner::CommandRunner;
use crate::ui::Operator;
use crate::warning::WorkflowWarning;

const EXAMPLE_BRANCH_NAMES: [&str; 3] = [
    "api-fix-invalid-auth",
    "desktop-cleanup-avatar-markup",
    "share-form-add-edit-link",
];

/// Lines of a review description quoted in the review-request post
const REVIEW_SUMMARY_LINES: usize = 5;

/// The external collaborators a workflow runs against
pub struct Collaborators<'a> {
    pub repo: &'a dyn Repository,
    pub executor: &'a dyn CommandExecutor,
    pub operator: &'a dyn Operator,
    pub messenger: &'a dyn Messenger,
    pub reviewer: &'a dyn ReviewRequester,
}

pub struct Workflow<'a> {
    config: &'a Config,
    classifier: BranchClassifier,
    repo: &'a dyn Repository,
    runner: CommandRunner<'a>,
    operator: &'a dyn Operator,
    messenger: &'a dyn Messenger,
    reviewer: &'a dyn ReviewRequester,
    quiet: bool,
}

impl<'a> Workflow<'a> {
    pub fn new(config: &'a Config, collaborators: Collaborators<'a>) -> Self {
        Workflow {
            config,
            classifier: BranchClassifier::new(&config.branches),
            repo: collaborators.repo,
            runner: CommandRunner::new(collaborators.executor),
            operator: collaborators.operator,
            messenger: collaborators.messenger,
            reviewer: collaborators.reviewer,
            quiet: false,
        }
    }

    /// Skip posting to the activity feed
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn classifier(&self) -> &BranchClassifier {
        &self.classifier
    }

    /// Every command issued by this workflow so far
    pub fn command_log(&self) -> &[Command] {
        self.runner.log()
    }

    pub fn take_warnings(&mut self) -> Vec<WorkflowWarning> {
        self.runner.take_warnings()
    }

    fn remote(&self) -> &'a str {
        &self.config.remote
    }

    fn base(&self) -> &'a str {
        &self.config.branches.base
    }

    fn post(&self, message: Message) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.messenger.post(&message)
    }

    /// Refresh `branch` from its own remote copy and from base, then publish it.
    ///
    /// The own-remote pull is tolerant: a branch that was never shared has no remote copy.
    pub(crate) fn refresh_branch(&mut self, branch: &str) -> Result<()> {
        let (remote, base) = (self.remote(), self.base());
        self.operator.say(&format!(
            "updating {} to have most recent changes from {}",
            branch, base
        ));

        self.runner.run_tolerant(Command::pull(remote, branch))?;
        self.runner.run(Command::pull(remote, base))?;
        self.runner.run(Command::push_head(remote))
    }

    /// Update the current branch with the latest changes from its remote and from base.
    pub fn update(&mut self) -> Result<()> {
        let branch = self.repo.current_branch()?;
        self.refresh_branch(&branch)
    }

    /// Start a new branch off the latest base.
    ///
    /// Without a name the operator is asked until a valid, unused one is given.
    pub fn start(&mut self, name: Option<&str>) -> Result<String> {
        let remote_branches = self.repo.list_branches(&BranchQuery::remote())?;

        let branch = match name {
            Some(name) => {
                validate_branch_name(name, &remote_branches)?;
                name.to_string()
            }
            None => loop {
                let example = EXAMPLE_BRANCH_NAMES[std::process::id() as usize % 3];
                let answer = self.operator.ask(&format!(
                    "What would you like to name your branch? (ex: {})",
                    example
                ))?;
                match validate_branch_name(&answer, &remote_branches) {
                    Ok(()) => break answer,
                    Err(err) => self.operator.say(&err.to_string()),
                }
            },
        };

        let base = self.base();
        self.runner.run(Command::checkout(base))?;
        self.runner.run(Command::pull_upstream())?;
        self.runner.run(Command::create_branch(&branch))?;

        self.post(Message::new(format!("#worklog starting work on {}", branch)))?;
        Ok(branch)
    }

    /// Publish the current branch to the remote.
    pub fn share(&mut self) -> Result<()> {
        let branch = self.repo.current_branch()?;
        self.runner.run(Command::publish(self.remote(), &branch))
    }

    /// Make the current branch track its same-named remote branch.
    pub fn track(&mut self) -> Result<()> {
        let branch = self.repo.current_branch()?;
        self.runner.run(Command::track(self.remote(), &branch))
    }

    /// Integrate the current branch into an aggregate branch (the default one when `None`).
    pub fn integrate(&mut self, target: Option<&str>) -> Result<()> {
        let target = target
            .unwrap_or(self.classifier.default_integration())
            .to_string();
        self.classifier
            .assert_aggregate(&target, "be integrated into")?;
        let branch = self.repo.current_branch()?;

        self.refresh_branch(&branch)?;
        self.integrate_branch(&branch, &target)?;
        self.runner.run(Command::checkout(&branch))?;

        self.post(Message::new(format!(
            "#worklog integrating {} into {}",
            branch, target
        )))
    }

    /// Deprecated spelling of integrating into staging.
    pub fn promote(&mut self) -> Result<()> {
        let staging = self.classifier.staging().to_string();
        self.runner.record_warning(WorkflowWarning::DeprecatedCommand {
            used: "promote".to_string(),
            replacement: format!("integrate {}", staging),
        });
        self.integrate(Some(&staging))
    }

    /// Reset an aggregate branch to a known-good snapshot.
    ///
    /// `destination` names the good state; when `None` the operator is asked, and an empty
    /// answer means the bad branch's own snapshot.
    pub fn nuke(&mut self, bad_branch: &str, destination: Option<&str>) -> Result<NukeReport> {
        self.classifier.assert_aggregate(bad_branch, "be reset")?;

        let hint = match destination {
            Some(destination) => destination.to_string(),
            None => self.operator.ask(&format!(
                "What branch do you want to reset {} to? (default: {})",
                bad_branch,
                snapshot_name(bad_branch)
            ))?,
        };

        self.nuke_branch(bad_branch, &hint)
    }

    /// Release the current branch to production.
    pub fn release(&mut self) -> Result<ReleaseOutcome> {
        let branch = self.repo.current_branch()?;
        self.release_branch(&branch)
    }

    /// Open a review request for the current branch and announce it.
    pub fn review_request(&mut self, description: Option<&str>) -> Result<String> {
        let token = self.config.github.resolve_token()?;

        self.update()?;

        let description = match description {
            Some(description) => description.to_string(),
            None => self.operator.compose(PULL_REQUEST_TEMPLATE)?,
        };
        if description.trim().is_empty() {
            return Err(GitxError::prompt("review request description is empty"));
        }

        let branch = self.repo.current_branch()?;
        let repo = self.repo.current_repo()?;
        let url = self
            .reviewer
            .create_review_request(&token, &branch, &repo, &description)?;

        let short_description = description
            .lines()
            .take(REVIEW_SUMMARY_LINES)
            .collect::<Vec<_>>()
            .join("\n");
        let headline = match &self.config.messaging.review_audience {
            Some(audience) => format!("{} #reviewrequest for {}", audience, branch),
            None => format!("#reviewrequest for {}", branch),
        };
        let body = [
            headline,
            short_description,
            self.repo.changelog_summary(&branch)?,
        ]
        .join("\n\n");

        self.post(
            Message::new(body)
                .with_url(url.clone())
                .with_type("review_request"),
        )?;
        Ok(url)
    }
}
