//! Domain logic - branch roles and the commands issued against them

pub mod branch;
pub mod command;

pub use branch::{
    backport_name, reset_source, snapshot_name, validate_branch_name, BranchClassifier,
    BranchKind,
};
pub use command::{Command, Policy};
