pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod messaging;
pub mod review;
pub mod runner;
pub mod ui;
pub mod warning;
pub mod workflow;

pub use error::{GitxError, Result};
