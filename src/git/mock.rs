use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::domain::Command;
use crate::error::{GitxError, Result};
use crate::git::{BranchQuery, CommandExecutor, Repository};

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    current: String,
    repo: String,
    changelog: BTreeMap<String, String>,
    branches: BTreeMap<BranchQuery, BTreeSet<String>>,
    queries: RefCell<Vec<BranchQuery>>,
}

impl MockRepository {
    /// Create a mock repository checked out on `current`
    pub fn new(current: impl Into<String>) -> Self {
        MockRepository {
            current: current.into(),
            repo: "socialteam/gitx".to_string(),
            changelog: BTreeMap::new(),
            branches: BTreeMap::new(),
            queries: RefCell::new(Vec::new()),
        }
    }

    /// Answer `query` with `names`; unset queries answer with an empty set
    pub fn set_branches<I, S>(&mut self, query: BranchQuery, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.branches
            .insert(query, names.into_iter().map(Into::into).collect());
    }

    pub fn set_repo(&mut self, repo: impl Into<String>) {
        self.repo = repo.into();
    }

    pub fn set_changelog(&mut self, branch: impl Into<String>, summary: impl Into<String>) {
        self.changelog.insert(branch.into(), summary.into());
    }

    /// Every branch query made so far, in order
    pub fn queries(&self) -> Vec<BranchQuery> {
        self.queries.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new("master")
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        Ok(self.current.clone())
    }

    fn list_branches(&self, query: &BranchQuery) -> Result<BTreeSet<String>> {
        self.queries.borrow_mut().push(query.clone());
        Ok(self.branches.get(query).cloned().unwrap_or_default())
    }

    fn current_repo(&self) -> Result<String> {
        Ok(self.repo.clone())
    }

    fn changelog_summary(&self, branch: &str) -> Result<String> {
        Ok(self.changelog.get(branch).cloned().unwrap_or_default())
    }
}

/// Executor that records commands instead of running them
#[derive(Default)]
pub struct RecordingExecutor {
    executed: RefCell<Vec<String>>,
    failing: HashSet<String>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        RecordingExecutor::default()
    }

    /// Make the command rendered as `invocation` fail when executed
    pub fn fail_on(mut self, invocation: impl Into<String>) -> Self {
        self.failing.insert(invocation.into());
        self
    }

    /// Rendered invocations of every command executed so far
    pub fn executed(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&self, command: &Command) -> Result<()> {
        let invocation = command.to_string();
        self.executed.borrow_mut().push(invocation.clone());
        if self.failing.contains(&invocation) {
            Err(GitxError::vcs(invocation, "exit status: 1"))
        } else {
            Ok(())
        }
    }
}
