//! Merging one branch's work into an aggregate (or the base) branch.

use crate::domain::Command;
use crate::error::Result;
use crate::workflow::Workflow;

impl<'a> Workflow<'a> {
    /// Merge `source` into `target` and publish `target`.
    ///
    /// `target` must be an aggregate branch or the base branch. When `target` cascades into
    /// an upstream aggregate, that aggregate is refreshed from `target` right afterwards, one
    /// level deep. The checkout ends on `source`, or on `target` after a cascade.
    ///
    /// Returns the commands issued.
    pub fn integrate_branch(&mut self, source: &str, target: &str) -> Result<Vec<Command>> {
        if target != self.base() {
            self.classifier
                .assert_aggregate(target, "be integrated into")?;
        }

        let mark = self.runner.mark();
        self.merge_into(source, target)?;

        if let Some(upstream) = self.classifier.cascade_target(target).map(str::to_string) {
            self.merge_into(target, &upstream)?;
        }

        Ok(self.runner.since(mark).to_vec())
    }

    fn merge_into(&mut self, source: &str, target: &str) -> Result<()> {
        let (remote, base) = (self.remote(), self.base());

        // the local base branch is never thrown away
        if target != base {
            self.runner
                .run_tolerant(Command::force_delete_local(target))?;
        }
        self.runner.run(Command::checkout(target))?;
        self.runner.run(Command::pull(remote, target))?;
        self.runner.run(Command::pull_local(source))?;
        self.runner.run(Command::push_head(remote))?;
        self.runner.run(Command::checkout(source))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::GitxError;
    use crate::git::RecordingExecutor;
    use crate::workflow::fixture::{rendered, Fixture};

    #[test]
    fn test_integrate_branch_into_prototype() {
        let fx = Fixture::on("FOO");
        let mut workflow = fx.workflow();

        let commands = workflow.integrate_branch("FOO", "prototype").unwrap();

        assert_eq!(
            rendered(&commands),
            vec![
                "git branch -D prototype",
                "git checkout prototype",
                "git pull origin prototype",
                "git pull . FOO",
                "git push origin HEAD",
                "git checkout FOO",
            ]
        );
    }

    #[test]
    fn test_integrate_branch_into_staging_cascades_once() {
        let fx = Fixture::on("FOO");
        let mut workflow = fx.workflow();

        let commands = workflow.integrate_branch("FOO", "staging").unwrap();

        assert_eq!(commands.len(), 12);
        assert_eq!(commands[4].to_string(), "git push origin HEAD");
        assert_eq!(
            rendered(&commands[6..]),
            vec![
                "git branch -D prototype",
                "git checkout prototype",
                "git pull origin prototype",
                "git pull . staging",
                "git push origin HEAD",
                "git checkout staging",
            ]
        );
    }

    #[test]
    fn test_integrate_branch_into_base_keeps_local_base() {
        let fx = Fixture::on("FOO");
        let mut workflow = fx.workflow();

        let commands = workflow.integrate_branch("FOO", "master").unwrap();

        assert_eq!(
            rendered(&commands),
            vec![
                "git checkout master",
                "git pull origin master",
                "git pull . FOO",
                "git push origin HEAD",
                "git checkout FOO",
            ]
        );
    }

    #[test]
    fn test_integrate_branch_rejects_feature_target() {
        let fx = Fixture::on("FOO");
        let mut workflow = fx.workflow();

        let err = workflow.integrate_branch("FOO", "dev-bar").unwrap_err();

        assert!(matches!(err, GitxError::InvalidTarget { .. }));
        assert!(fx.executed().is_empty());
    }

    #[test]
    fn test_missing_local_target_is_tolerated() {
        let mut fx = Fixture::on("FOO");
        fx.executor = RecordingExecutor::new().fail_on("git branch -D prototype");
        let mut workflow = fx.workflow();

        let commands = workflow.integrate_branch("FOO", "prototype").unwrap();

        assert_eq!(commands.len(), 6);
        assert_eq!(workflow.take_warnings().len(), 1);
    }

    #[test]
    fn test_failed_merge_stops_the_sequence() {
        let mut fx = Fixture::on("FOO");
        fx.executor = RecordingExecutor::new().fail_on("git pull . FOO");
        let mut workflow = fx.workflow();

        let err = workflow.integrate_branch("FOO", "staging").unwrap_err();

        assert!(matches!(err, GitxError::Vcs { .. }));
        assert_eq!(
            rendered(workflow.command_log()),
            vec![
                "git branch -D staging",
                "git checkout staging",
                "git pull origin staging",
                "git pull . FOO",
            ]
        );
    }
}
