//! Typed `check_suite` webhook payload
//!
//! Only the fields the policy reads are modelled; everything else in the
//! delivery is ignored by serde.

use crate::error::{Error, Result};
use crate::types::{CheckConclusion, PullRequestCandidate};
use serde::Deserialize;

/// Action carried by a `check_suite` delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckSuiteAction {
    /// The suite finished; the only action steward evaluates
    Completed,
    /// A new run of the suite was requested
    Requested,
    /// A re-run was requested
    Rerequested,
    /// Anything GitHub adds later
    #[serde(other)]
    Unknown,
}

/// A `check_suite` webhook delivery
#[derive(Debug, Clone, Deserialize)]
pub struct CheckSuiteEvent {
    /// What happened to the suite
    pub action: CheckSuiteAction,
    /// The suite itself
    pub check_suite: CheckSuitePayload,
    /// Repository the suite ran in
    pub repository: RepositoryPayload,
}

/// The `check_suite` object of the delivery
#[derive(Debug, Clone, Deserialize)]
pub struct CheckSuitePayload {
    /// Suite ID
    pub id: u64,
    /// Branch the suite ran for (None for detached commits)
    #[serde(default)]
    pub head_branch: Option<String>,
    /// Commit the suite ran for
    pub head_sha: String,
    /// Overall conclusion
    #[serde(default)]
    pub conclusion: Option<CheckConclusion>,
    /// Pull requests whose head is this commit
    #[serde(default)]
    pub pull_requests: Vec<PullRequestPayload>,
}

/// Minimal pull request reference attached to a suite
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPayload {
    /// PR number
    pub number: u64,
    /// Head side
    pub head: BranchPayload,
    /// Base side
    pub base: BranchPayload,
}

/// One side of a pull request
#[derive(Debug, Clone, Deserialize)]
pub struct BranchPayload {
    /// Branch name
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Commit SHA
    pub sha: String,
    /// Repository the branch lives in
    pub repo: RepoIdPayload,
}

/// Repository identity inside a pull request reference
#[derive(Debug, Clone, Deserialize)]
pub struct RepoIdPayload {
    /// Repository ID
    pub id: u64,
}

/// The `repository` object of the delivery
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    /// Repository ID
    pub id: u64,
    /// Repository name
    pub name: String,
    /// Owning account
    pub owner: OwnerPayload,
}

/// Repository owner
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerPayload {
    /// Login name
    pub login: String,
}

impl CheckSuiteEvent {
    /// Parse a delivery body
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::Payload(e.to_string()))
    }

    /// Whether this delivery reports a finished suite
    pub fn is_completed(&self) -> bool {
        self.action == CheckSuiteAction::Completed
    }

    /// The pull request to evaluate, if any is attached
    ///
    /// GitHub lists every open PR whose head is the suite's commit; the
    /// first one is evaluated.
    pub fn candidate(&self) -> Option<PullRequestCandidate> {
        self.check_suite
            .pull_requests
            .first()
            .map(|pr| PullRequestCandidate {
                number: pr.number,
                head_ref: pr.head.ref_name.clone(),
                head_sha: pr.head.sha.clone(),
                head_repo_id: pr.head.repo.id,
                base_ref: pr.base.ref_name.clone(),
                base_repo_id: pr.base.repo.id,
            })
    }
}
