use std::fmt;

/// Non-fatal conditions raised while running a workflow.
/// These are reported to the operator but never abort a sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowWarning {
    /// A command run under the tolerant policy failed and was skipped
    ToleratedFailure { command: String, reason: String },
    /// A deprecated verb was used
    DeprecatedCommand { used: String, replacement: String },
    /// A reset orphaned work that was only merged into the reset branch
    OrphanedBranches { reset: String, branches: Vec<String> },
}

impl fmt::Display for WorkflowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowWarning::ToleratedFailure { command, reason } => {
                write!(f, "Ignoring failure of `{}`: {}", command, reason)
            }
            WorkflowWarning::DeprecatedCommand { used, replacement } => {
                write!(f, "DEPRECATED: Use `{}` instead of `{}`", replacement, used)
            }
            WorkflowWarning::OrphanedBranches { reset, branches } => {
                write!(
                    f,
                    "Resetting '{}' dropped work from {} branch(es): {}",
                    reset,
                    branches.len(),
                    branches.join(", ")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerated_failure_display() {
        let warning = WorkflowWarning::ToleratedFailure {
            command: "git branch -D prototype".to_string(),
            reason: "branch not found".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Ignoring failure of `git branch -D prototype`: branch not found"
        );
    }

    #[test]
    fn test_orphaned_branches_display() {
        let warning = WorkflowWarning::OrphanedBranches {
            reset: "prototype".to_string(),
            branches: vec!["dev-bar".to_string(), "dev-baz".to_string()],
        };
        let msg = warning.to_string();
        assert!(msg.contains("prototype"));
        assert!(msg.contains("2 branch(es)"));
        assert!(msg.contains("dev-bar, dev-baz"));
    }
}
