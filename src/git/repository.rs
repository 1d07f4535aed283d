use std::collections::BTreeSet;
use std::path::Path;

use git2::{BranchType, Oid, Repository as Git2Repo};

use crate::error::{GitxError, Result};
use crate::git::BranchQuery;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    remote: String,
    base: String,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(
        path: P,
        remote: impl Into<String>,
        base: impl Into<String>,
    ) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository::from_git2(repo, remote, base))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo, remote: impl Into<String>, base: impl Into<String>) -> Self {
        Git2Repository {
            repo,
            remote: remote.into(),
            base: base.into(),
        }
    }

    fn remote_prefix(&self) -> String {
        format!("{}/", self.remote)
    }

    /// Tip of `branch`, preferring the remote-tracking ref when `remote` is set
    fn resolve_tip(&self, branch: &str, remote: bool) -> Result<Oid> {
        let remote_ref = format!("refs/remotes/{}/{}", self.remote, branch);
        let local_ref = format!("refs/heads/{}", branch);
        let candidates = if remote {
            [remote_ref, local_ref]
        } else {
            [local_ref, remote_ref]
        };

        for name in &candidates {
            if let Ok(reference) = self.repo.find_reference(name) {
                return Ok(reference.peel_to_commit()?.id());
            }
        }

        Err(GitxError::remote(format!(
            "Cannot find branch '{}' locally or on '{}'",
            branch, self.remote
        )))
    }

    fn is_merged(&self, tip: Oid, into: Oid) -> Result<bool> {
        Ok(tip == into || self.repo.graph_descendant_of(into, tip)?)
    }
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(GitxError::remote("HEAD is detached; check out a branch first"));
        }
        head.shorthand()
            .map(|s| s.to_string())
            .ok_or_else(|| GitxError::remote("HEAD has a non UTF-8 branch name"))
    }

    fn list_branches(&self, query: &BranchQuery) -> Result<BTreeSet<String>> {
        let branch_type = if query.remote {
            BranchType::Remote
        } else {
            BranchType::Local
        };
        let into = match &query.merged_into {
            Some(branch) => Some(self.resolve_tip(branch, query.remote)?),
            None => None,
        };
        let prefix = self.remote_prefix();

        let mut names = BTreeSet::new();
        for entry in self.repo.branches(Some(branch_type))? {
            let (branch, _) = entry?;
            let Some(full_name) = branch.name()? else {
                continue;
            };

            let name = if query.remote {
                match full_name.strip_prefix(&prefix) {
                    Some(name) if name != "HEAD" => name.to_string(),
                    _ => continue,
                }
            } else {
                full_name.to_string()
            };

            if let Some(into) = into {
                let Some(tip) = branch.get().target() else {
                    continue;
                };
                if !self.is_merged(tip, into)? {
                    continue;
                }
            }

            names.insert(name);
        }

        Ok(names)
    }

    fn current_repo(&self) -> Result<String> {
        let remote = self
            .repo
            .find_remote(&self.remote)
            .map_err(|e| GitxError::remote(format!("Cannot find remote: {}", e)))?;
        let url = remote
            .url()
            .ok_or_else(|| GitxError::remote("Remote URL is not valid UTF-8"))?;

        parse_repo_slug(url)
            .ok_or_else(|| GitxError::remote(format!("Cannot parse repository from '{}'", url)))
    }

    fn changelog_summary(&self, branch: &str) -> Result<String> {
        let tip = self.resolve_tip(branch, false)?;
        let base = self.resolve_tip(&self.base, true)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(tip)?;
        revwalk.hide(base)?;

        let mut lines = Vec::new();
        for oid_result in revwalk {
            let commit = self.repo.find_commit(oid_result?)?;
            let subject = commit.summary().unwrap_or("(empty message)");
            let author = commit.author().name().unwrap_or("unknown").to_string();
            lines.push(format!("* {} ({})", subject, author));
        }

        lines.reverse();
        Ok(lines.join("\n"))
    }
}

/// Extracts `owner/name` from an ssh or https remote URL.
pub fn parse_repo_slug(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    let mut parts = trimmed.rsplit(|c| c == '/' || c == ':');
    let name = parts.next().filter(|s| !s.is_empty())?;
    let owner = parts.next().filter(|s| !s.is_empty())?;
    Some(format!("{}/{}", owner, name))
}
