use thiserror::Error;

/// Unified error type for gitx operations
#[derive(Error, Debug)]
pub enum GitxError {
    #[error("Only aggregate branches are allowed to {action}: '{branch}' is not one")]
    InvalidTarget { branch: String, action: String },

    #[error("Cannot {action} protected branch '{branch}'")]
    ProtectedBranch { branch: String, action: String },

    #[error("Command `{command}` failed: {reason}")]
    Vcs { command: String, reason: String },

    #[error("Invalid branch name '{0}'")]
    InvalidBranchName(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gitx
pub type Result<T> = std::result::Result<T, GitxError>;

impl GitxError {
    /// Create an invalid-target error for a non-aggregate branch
    pub fn invalid_target(branch: impl Into<String>, action: impl Into<String>) -> Self {
        GitxError::InvalidTarget {
            branch: branch.into(),
            action: action.into(),
        }
    }

    /// Create a protected-branch error
    pub fn protected(branch: impl Into<String>, action: impl Into<String>) -> Self {
        GitxError::ProtectedBranch {
            branch: branch.into(),
            action: action.into(),
        }
    }

    /// Create a fatal command failure
    pub fn vcs(command: impl ToString, reason: impl Into<String>) -> Self {
        GitxError::Vcs {
            command: command.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitxError::Config(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        GitxError::Remote(msg.into())
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        GitxError::Prompt(msg.into())
    }

    /// True for the validation errors raised before any command is issued.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GitxError::InvalidTarget { .. }
                | GitxError::ProtectedBranch { .. }
                | GitxError::InvalidBranchName(_)
        )
    }
}
