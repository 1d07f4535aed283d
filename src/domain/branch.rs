use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::BranchesConfig;
use crate::error::{GitxError, Result};

/// Prefix carried by snapshot branches
pub const SNAPSHOT_PREFIX: &str = "last_known_good_";

/// Prefix carried by backport branches
pub const BACKPORT_PREFIX: &str = "backport_";

static BRANCH_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid branch name regex"));

/// The role a branch plays in the branching convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Base,
    Aggregate,
    Snapshot,
    Backport,
    Feature,
}

impl BranchKind {
    /// Protected branches may never be released directly
    pub fn is_protected(self) -> bool {
        matches!(self, BranchKind::Base | BranchKind::Aggregate)
    }

    /// Branches that live on indefinitely and are never cleaned up
    pub fn is_long_lived(self) -> bool {
        matches!(
            self,
            BranchKind::Base
                | BranchKind::Aggregate
                | BranchKind::Snapshot
                | BranchKind::Backport
        )
    }
}

/// Classifies branch names against the configured convention.
///
/// Built once from the loaded configuration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchClassifier {
    base: String,
    aggregates: BTreeSet<String>,
    cascade: Vec<(String, String)>,
    default_integration: String,
    staging: String,
}

impl BranchClassifier {
    pub fn new(config: &BranchesConfig) -> Self {
        BranchClassifier {
            base: config.base.clone(),
            aggregates: config.aggregates.iter().cloned().collect(),
            cascade: config
                .cascade
                .iter()
                .map(|(down, up)| (down.clone(), up.clone()))
                .collect(),
            default_integration: config.default_integration.clone(),
            staging: config.staging.clone(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn default_integration(&self) -> &str {
        &self.default_integration
    }

    pub fn staging(&self) -> &str {
        &self.staging
    }

    pub fn classify(&self, name: &str) -> BranchKind {
        if name == self.base {
            BranchKind::Base
        } else if self.aggregates.contains(name) {
            BranchKind::Aggregate
        } else if name.starts_with(SNAPSHOT_PREFIX) {
            BranchKind::Snapshot
        } else if name.starts_with(BACKPORT_PREFIX) {
            BranchKind::Backport
        } else {
            BranchKind::Feature
        }
    }

    pub fn is_aggregate(&self, name: &str) -> bool {
        self.aggregates.contains(name)
    }

    pub fn is_protected(&self, name: &str) -> bool {
        name == self.base || self.is_aggregate(name)
    }

    /// Fails with [`GitxError::InvalidTarget`] unless `name` is an aggregate branch.
    pub fn assert_aggregate(&self, name: &str, action: &str) -> Result<()> {
        if self.is_aggregate(name) {
            Ok(())
        } else {
            Err(GitxError::invalid_target(name, action))
        }
    }

    /// Fails with [`GitxError::InvalidTarget`] unless `name` is an aggregate or an aggregate's snapshot.
    pub fn assert_resettable(&self, name: &str) -> Result<()> {
        let aggregate = name.strip_prefix(SNAPSHOT_PREFIX).unwrap_or(name);
        self.assert_aggregate(aggregate, "be reset")
            .map_err(|_| GitxError::invalid_target(name, "be reset"))
    }

    /// Fails with [`GitxError::ProtectedBranch`] if `name` is base or aggregate.
    pub fn assert_not_protected(&self, name: &str, action: &str) -> Result<()> {
        if self.is_protected(name) {
            Err(GitxError::protected(name, action))
        } else {
            Ok(())
        }
    }

    /// The upstream aggregate that integrating into `target` must also refresh.
    pub fn cascade_target(&self, target: &str) -> Option<&str> {
        self.cascade
            .iter()
            .find(|(down, _)| down == target)
            .map(|(_, up)| up.as_str())
    }
}

/// Snapshot name for `name`; names already carrying the prefix are returned unchanged.
pub fn snapshot_name(name: &str) -> String {
    if name.starts_with(SNAPSHOT_PREFIX) {
        name.to_string()
    } else {
        format!("{}{}", SNAPSHOT_PREFIX, name)
    }
}

pub fn backport_name(name: &str) -> String {
    format!("{}{}", BACKPORT_PREFIX, name)
}

/// Resolves the known-good branch a reset of `bad_branch` should restore.
///
/// An empty hint means the bad branch's own snapshot.
pub fn reset_source(bad_branch: &str, hint: &str) -> String {
    let hint = hint.trim();
    if hint.is_empty() {
        snapshot_name(bad_branch)
    } else {
        snapshot_name(hint)
    }
}

/// Checks a new branch name: word characters and dashes only, not already on the remote.
pub fn validate_branch_name(name: &str, remote_branches: &BTreeSet<String>) -> Result<()> {
    if !BRANCH_NAME_REGEX.is_match(name) || remote_branches.contains(name) {
        return Err(GitxError::InvalidBranchName(name.to_string()));
    }
    Ok(())
}
