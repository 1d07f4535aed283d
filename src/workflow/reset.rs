//! Forcing an aggregate branch back to a known-good snapshot.

use crate::domain::{reset_source, snapshot_name, BranchKind, Command};
use crate::error::Result;
use crate::git::BranchQuery;
use crate::messaging::Message;
use crate::ui::formatter::format_affected_branches;
use crate::warning::WorkflowWarning;
use crate::workflow::Workflow;

/// What a nuke did
#[derive(Debug, Clone, PartialEq)]
pub struct NukeReport {
    /// The snapshot the branch was reset to
    pub good_branch: String,
    /// Feature branches whose work only the old branch contained
    pub affected: Vec<String>,
    pub commands: Vec<Command>,
}

impl<'a> Workflow<'a> {
    /// Replace `target` with the content of `good_branch`, locally and on the remote.
    ///
    /// The remote branch is deleted and published again rather than force-updated, so open
    /// references against the old branch are visibly invalidated. Starts and ends on base.
    ///
    /// Only aggregates and their snapshots can be reset; anything else is rejected before a
    /// command is issued.
    pub fn reset_branch(&mut self, target: &str, good_branch: &str) -> Result<Vec<Command>> {
        self.classifier.assert_resettable(target)?;
        let (remote, base) = (self.remote(), self.base());
        let mark = self.runner.mark();

        self.runner.run(Command::checkout(base))?;
        self.runner
            .run_tolerant(Command::force_delete_local(good_branch))?;
        self.runner.run(Command::checkout(good_branch))?;
        self.runner.run(Command::pull(remote, good_branch))?;
        self.runner
            .run_tolerant(Command::force_delete_local(target))?;
        self.runner.run(Command::delete_remote(remote, target))?;
        self.runner.run(Command::create_branch(target))?;
        self.runner.run(Command::publish(remote, target))?;
        self.runner.run(Command::checkout(base))?;

        Ok(self.runner.since(mark).to_vec())
    }

    /// Feature branches merged into `bad_branch` but not into `good_branch`.
    ///
    /// Branches merged into neither are not reported.
    pub fn affected_branches(&self, bad_branch: &str, good_branch: &str) -> Result<Vec<String>> {
        let in_bad = self
            .repo
            .list_branches(&BranchQuery::remote().merged_into(bad_branch))?;
        let in_good = self
            .repo
            .list_branches(&BranchQuery::remote().merged_into(good_branch))?;

        Ok(in_bad
            .difference(&in_good)
            .filter(|name| self.classifier.classify(name) == BranchKind::Feature)
            .cloned()
            .collect())
    }

    /// Reset aggregate `bad_branch` and its snapshot to the good state named by `hint`.
    ///
    /// An empty hint resets to the branch's own snapshot, in which case the snapshot itself
    /// is left alone.
    pub fn nuke_branch(&mut self, bad_branch: &str, hint: &str) -> Result<NukeReport> {
        self.classifier.assert_aggregate(bad_branch, "be reset")?;
        let good_branch = reset_source(bad_branch, hint);
        let affected = self.affected_branches(bad_branch, &good_branch)?;

        let mark = self.runner.mark();
        self.reset_branch(bad_branch, &good_branch)?;
        let snapshot = snapshot_name(bad_branch);
        if snapshot != good_branch {
            self.reset_branch(&snapshot, &good_branch)?;
        }
        let commands = self.runner.since(mark).to_vec();

        let mut body = format!(
            "#worklog resetting {} branch to {}",
            bad_branch, good_branch
        );
        if !affected.is_empty() {
            self.runner.record_warning(WorkflowWarning::OrphanedBranches {
                reset: bad_branch.to_string(),
                branches: affected.clone(),
            });
            body.push_str("\n\n");
            body.push_str(&format_affected_branches(&affected));
        }
        self.post(Message::new(body))?;

        Ok(NukeReport {
            good_branch,
            affected,
            commands,
        })
    }
}
