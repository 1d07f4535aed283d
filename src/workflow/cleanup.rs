//! Removing branches that already reached the base branch.

use crate::domain::Command;
use crate::error::Result;
use crate::git::BranchQuery;
use crate::workflow::Workflow;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CleanupReport {
    pub remote_deleted: Vec<String>,
    pub local_deleted: Vec<String>,
}

impl<'a> Workflow<'a> {
    /// Delete remote and local branches already merged into base.
    ///
    /// Base, aggregate, snapshot and backport branches are skipped whatever their merge status.
    /// Leaves the checkout on base.
    pub fn cleanup(&mut self) -> Result<CleanupReport> {
        let (remote, base) = (self.remote(), self.base());

        self.runner.run(Command::checkout(base))?;
        self.runner.run(Command::pull_upstream())?;
        self.runner.run(Command::prune(remote))?;

        self.operator.say(&format!(
            "Deleting branches that have been merged into {}",
            base
        ));
        let mut report = CleanupReport::default();

        let merged_remote = self
            .repo
            .list_branches(&BranchQuery::remote().merged_into(base))?;
        for branch in merged_remote {
            if self.classifier.classify(&branch).is_long_lived() {
                continue;
            }
            self.runner.run(Command::delete_remote(remote, &branch))?;
            report.remote_deleted.push(branch);
        }

        let merged_local = self
            .repo
            .list_branches(&BranchQuery::local().merged_into(base))?;
        for branch in merged_local {
            if self.classifier.classify(&branch).is_long_lived() {
                continue;
            }
            self.runner.run(Command::delete_local(&branch))?;
            report.local_deleted.push(branch);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use crate::git::BranchQuery;
    use crate::workflow::fixture::Fixture;

    #[test]
    fn test_cleanup_with_nothing_merged() {
        let fx = Fixture::on("master");
        let mut workflow = fx.workflow();

        let report = workflow.cleanup().unwrap();

        assert!(report.remote_deleted.is_empty());
        assert!(report.local_deleted.is_empty());
        assert_eq!(
            fx.executed(),
            vec!["git checkout master", "git pull", "git remote prune origin"]
        );
    }

    #[test]
    fn test_cleanup_skips_long_lived_branches() {
        let mut fx = Fixture::on("master");
        fx.repo.set_branches(
            BranchQuery::remote().merged_into("master"),
            ["backport_dev-old", "dev-foo", "master", "staging", "last_known_good_master"],
        );
        fx.repo.set_branches(
            BranchQuery::local().merged_into("master"),
            ["dev-foo", "dev-old", "master", "prototype"],
        );
        let mut workflow = fx.workflow();

        let report = workflow.cleanup().unwrap();

        assert_eq!(report.remote_deleted, vec!["dev-foo"]);
        assert_eq!(report.local_deleted, vec!["dev-foo", "dev-old"]);
        assert_eq!(
            fx.executed()[3..],
            [
                "git push origin --delete dev-foo",
                "git branch -d dev-foo",
                "git branch -d dev-old",
            ]
        );
    }
}
