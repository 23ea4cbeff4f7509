//! steward - policy-gated auto-merge for dependency update pull requests
//!
//! Reacts to a completed `check_suite` delivery: runs the merge eligibility
//! guards over the attached pull request, the repository's `.steward.yml`
//! and the required status checks, and approves and merges when every guard
//! passes.

pub mod accounts;
pub mod auth;
pub mod checks;
pub mod config;
pub mod ecosystem;
pub mod error;
pub mod event;
pub mod handler;
pub mod merge;
pub mod platform;
pub mod policy;
pub mod types;

pub use error::{Error, Result};
pub use handler::{Evaluation, HandleOptions, handle_check_suite};
