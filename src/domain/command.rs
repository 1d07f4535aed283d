use std::fmt;

/// One atomic VCS operation, rendered as its literal invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub program: String,
    pub args: Vec<String>,
}

/// What the runner does when a command fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Abort the remaining sequence and propagate the failure
    #[default]
    Strict,
    /// Record the failure as a warning and keep going
    Tolerant,
}

impl Command {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command::new("git", args)
    }

    pub fn checkout(branch: &str) -> Self {
        Command::git(["checkout", branch])
    }

    pub fn create_branch(branch: &str) -> Self {
        Command::git(["checkout", "-b", branch])
    }

    /// Force-delete a local branch
    pub fn force_delete_local(branch: &str) -> Self {
        Command::git(["branch", "-D", branch])
    }

    /// Delete a local branch only if it is merged
    pub fn delete_local(branch: &str) -> Self {
        Command::git(["branch", "-d", branch])
    }

    pub fn delete_remote(remote: &str, branch: &str) -> Self {
        Command::git(["push", remote, "--delete", branch])
    }

    pub fn pull(remote: &str, branch: &str) -> Self {
        Command::git(["pull", remote, branch])
    }

    /// Pull the current branch's upstream
    pub fn pull_upstream() -> Self {
        Command::git(["pull"])
    }

    /// Merge a local branch into the checked-out one
    pub fn pull_local(branch: &str) -> Self {
        Command::git(["pull", ".", branch])
    }

    pub fn push_head(remote: &str) -> Self {
        Command::git(["push", remote, "HEAD"])
    }

    /// Push `branch` to a differently named remote branch
    pub fn push_as(remote: &str, branch: &str, remote_branch: &str) -> Self {
        Command::git(["push", remote, &format!("{}:{}", branch, remote_branch)])
    }

    /// Publish `branch` to the remote and track it
    pub fn publish(remote: &str, branch: &str) -> Self {
        Command::git(["push", "--set-upstream", remote, branch])
    }

    pub fn track(remote: &str, branch: &str) -> Self {
        Command::git([
            "branch".to_string(),
            format!("--set-upstream-to={}/{}", remote, branch),
            branch.to_string(),
        ])
    }

    pub fn prune(remote: &str) -> Self {
        Command::git(["remote", "prune", remote])
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_renders_invocation() {
        assert_eq!(Command::pull("origin", "FOO").to_string(), "git pull origin FOO");
        assert_eq!(Command::pull_local("FOO").to_string(), "git pull . FOO");
        assert_eq!(Command::push_head("origin").to_string(), "git push origin HEAD");
        assert_eq!(
            Command::force_delete_local("prototype").to_string(),
            "git branch -D prototype"
        );
        assert_eq!(
            Command::delete_remote("origin", "staging").to_string(),
            "git push origin --delete staging"
        );
    }

    #[test]
    fn test_retention_and_tracking() {
        assert_eq!(
            Command::push_as("origin", "FOO", "backport_FOO").to_string(),
            "git push origin FOO:backport_FOO"
        );
        assert_eq!(
            Command::track("origin", "FOO").to_string(),
            "git branch --set-upstream-to=origin/FOO FOO"
        );
        assert_eq!(
            Command::publish("origin", "prototype").to_string(),
            "git push --set-upstream origin prototype"
        );
    }

    #[test]
    fn test_default_policy_is_strict() {
        assert_eq!(Policy::default(), Policy::Strict);
    }
}
