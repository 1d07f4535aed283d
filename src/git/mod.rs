//! Git operations abstraction layer
//!
//! Two seams separate the workflow engines from a real repository:
//!
//! - [Repository] answers read-only questions (current branch, branch sets, changelog).
//!   [repository::Git2Repository] implements it with the `git2` crate.
//! - [CommandExecutor] carries out one [Command]. [shell::ShellExecutor] spawns the
//!   program; the engines never batch or reorder what they hand it.
//!
//! [mock] holds in-memory implementations of both for tests.
//!
//! ```rust
//! # use gitx::git::{BranchQuery, Repository};
//! # fn example<R: Repository>(repo: &R) -> gitx::Result<()> {
//! let merged = repo.list_branches(&BranchQuery::remote().merged_into("master"))?;
//! for branch in merged {
//!     println!("{}", branch);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;
pub mod shell;

pub use mock::{MockRepository, RecordingExecutor};
pub use repository::Git2Repository;
pub use shell::ShellExecutor;

use std::collections::BTreeSet;

use crate::domain::Command;
use crate::error::Result;

/// Which branches to enumerate
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct BranchQuery {
    /// Remote-tracking branches instead of local ones
    pub remote: bool,
    /// Only branches whose tip is already reachable from this branch
    pub merged_into: Option<String>,
}

impl BranchQuery {
    pub fn local() -> Self {
        BranchQuery::default()
    }

    pub fn remote() -> Self {
        BranchQuery {
            remote: true,
            merged_into: None,
        }
    }

    pub fn merged_into(mut self, branch: impl Into<String>) -> Self {
        self.merged_into = Some(branch.into());
        self
    }
}

/// Read-only view of the repository the workflow runs in
///
/// ## Error Handling
///
/// Implementations map underlying errors (like `git2::Error`) to
/// [crate::error::GitxError] variants.
pub trait Repository {
    /// Name of the checked-out branch
    ///
    /// # Returns
    /// * `Ok(String)` - Short branch name, e.g. "FOO"
    /// * `Err` - If HEAD is detached or unreadable
    fn current_branch(&self) -> Result<String>;

    /// Enumerate branch names matching `query`
    ///
    /// Remote branch names are returned without the remote prefix and without `HEAD`.
    fn list_branches(&self, query: &BranchQuery) -> Result<BTreeSet<String>>;

    /// Repository identifier on the hosting service, as `owner/name`
    fn current_repo(&self) -> Result<String>;

    /// Subjects of the commits on `branch` that the base branch does not have yet
    fn changelog_summary(&self, branch: &str) -> Result<String>;
}

/// Carries out commands one at a time
pub trait CommandExecutor {
    /// Run `command` to completion
    ///
    /// # Returns
    /// * `Ok(())` - The command succeeded
    /// * `Err` - [crate::error::GitxError::Vcs] naming the command on any failure
    fn execute(&self, command: &Command) -> Result<()>;
}
