//! Core types for steward

use serde::{Deserialize, Serialize};

/// The pull request under evaluation, extracted from a `check_suite` payload
///
/// Lives for one evaluation only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestCandidate {
    /// PR number
    pub number: u64,
    /// Head branch name
    pub head_ref: String,
    /// Head commit SHA
    pub head_sha: String,
    /// Repository ID the head branch lives in
    pub head_repo_id: u64,
    /// Base branch name
    pub base_ref: String,
    /// Repository ID the base branch lives in
    pub base_repo_id: u64,
}

/// Repository coordinates plus the API endpoint to reach them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// REST API base URL, e.g. `https://api.github.com`
    pub api_url: String,
}

/// Merge methods the repository settings allow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct RepositoryMergeCapability {
    /// "Allow merge commits"
    pub allow_merge_commit: bool,
    /// "Allow squash merging"
    pub allow_squash_merge: bool,
    /// "Allow rebase merging"
    pub allow_rebase_merge: bool,
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    /// Create a merge commit
    Merge,
    /// Squash all commits into one
    Squash,
    /// Rebase commits onto base branch
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merge => write!(f, "merge"),
            Self::Squash => write!(f, "squash"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

/// The parts of a pull request the guards look at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestState {
    /// PR number
    pub number: u64,
    /// Whether the PR has already been merged
    pub merged: bool,
    /// Account ID of the PR author (None for deleted accounts)
    pub author_id: Option<u64>,
}

/// A review left on a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrReview {
    /// Review ID
    pub id: u64,
    /// Account ID of the reviewer (None for deleted accounts)
    pub reviewer_id: Option<u64>,
}

/// A comment on a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrComment {
    /// Comment ID
    pub id: u64,
    /// Account ID of the comment author
    pub author_id: Option<u64>,
    /// Comment body text
    pub body: String,
}

/// What the contents API returned for a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoContent {
    /// Nothing at that path (404)
    Missing,
    /// A regular file with its base64-encoded content, as returned by the API
    File {
        /// Base64 content (may contain line breaks)
        encoded: String,
    },
    /// Something other than a regular file (directory, symlink, submodule)
    NotAFile,
}

/// Check suite status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckSuiteStatus {
    /// Waiting to start
    Queued,
    /// Running
    InProgress,
    /// Finished
    Completed,
    /// Requested, not yet queued
    Requested,
    /// Waiting on a deployment protection rule
    Waiting,
    /// Pending
    Pending,
    /// Anything GitHub adds later
    #[serde(other)]
    Unknown,
}

/// Conclusion of a check suite or check run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    /// Passed
    Success,
    /// Failed
    Failure,
    /// Neutral
    Neutral,
    /// Skipped
    Skipped,
    /// Timed out
    TimedOut,
    /// Cancelled
    Cancelled,
    /// Needs manual action
    ActionRequired,
    /// Failed to start
    StartupFailure,
    /// Marked stale by GitHub
    Stale,
    /// Anything GitHub adds later
    #[serde(other)]
    Other,
}

impl CheckConclusion {
    /// Whether this conclusion satisfies a required status check
    pub const fn is_passing(self) -> bool {
        matches!(self, Self::Success | Self::Skipped | Self::Neutral)
    }
}

/// A check suite as listed for a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSuiteSummary {
    /// Suite ID
    pub id: u64,
    /// Current status
    pub status: CheckSuiteStatus,
    /// Conclusion, once completed
    pub conclusion: Option<CheckConclusion>,
    /// Number of check runs attached to the latest run of this suite
    pub latest_check_runs_count: u64,
    /// Opaque URL listing the suite's check runs
    pub check_runs_url: String,
}

impl CheckSuiteSummary {
    /// Suites without any check runs are noise left by integrations that never report
    pub const fn is_valid(&self) -> bool {
        self.latest_check_runs_count > 0
    }
}

/// A single check run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRunResult {
    /// Check run name (matched against required status check contexts)
    pub name: String,
    /// Conclusion; `None` while the run is not finished
    pub conclusion: Option<CheckConclusion>,
}

impl CheckRunResult {
    /// Whether this run counts as passed
    pub fn passed(&self) -> bool {
        self.conclusion.is_some_and(CheckConclusion::is_passing)
    }
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}
