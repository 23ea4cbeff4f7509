//! Platform services for GitHub
//!
//! Every REST operation the policy engine and merge executor need, behind a
//! trait so the policy can run against a mock in tests.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{
    CheckRunResult, CheckSuiteSummary, MergeMethod, MergeResult, PlatformConfig, PrComment,
    PrReview, PullRequestState, RepoContent, RepositoryMergeCapability,
};
use async_trait::async_trait;

/// Platform service trait for the repository a delivery belongs to
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;

    /// Read the merge methods the repository allows
    async fn get_merge_capability(&self) -> Result<RepositoryMergeCapability>;

    /// List every review on a PR
    async fn list_pr_reviews(&self, pr_number: u64) -> Result<Vec<PrReview>>;

    /// Get merge state and author of a PR
    async fn get_pr_state(&self, pr_number: u64) -> Result<PullRequestState>;

    /// List comments on a PR
    async fn list_pr_comments(&self, pr_number: u64) -> Result<Vec<PrComment>>;

    /// Create a comment on a PR
    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()>;

    /// Fetch a path from the repository at a given ref
    ///
    /// A 404 is [`RepoContent::Missing`], not an error.
    async fn get_content(&self, path: &str, git_ref: &str) -> Result<RepoContent>;

    /// Contexts of the required status checks that apply to a branch
    async fn list_required_status_checks(&self, branch: &str) -> Result<Vec<String>>;

    /// List check suites for a commit
    async fn list_check_suites(&self, git_ref: &str) -> Result<Vec<CheckSuiteSummary>>;

    /// List every check run behind a suite's `check_runs_url`
    async fn list_check_runs(&self, check_runs_url: &str) -> Result<Vec<CheckRunResult>>;

    /// Submit an approving review, pinned to `commit_id`
    async fn approve_pr(&self, pr_number: u64, commit_id: &str, body: &str) -> Result<()>;

    /// Merge a PR with the specified method
    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult>;
}
