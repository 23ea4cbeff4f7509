//! Mock platform service for testing
//!
//! These are test utilities - not all may be used by every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::HashMap;
use std::sync::Mutex;
use dependabot_steward::error::{Error, Result};
use dependabot_steward::platform::PlatformService;
use dependabot_steward::types::{
    CheckRunResult, CheckSuiteSummary, MergeMethod, MergeResult, PlatformConfig, PrComment,
    PrReview, PullRequestState, RepoContent, RepositoryMergeCapability,
};

/// Call record for `create_pr_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentCall {
    pub pr_number: u64,
    pub body: String,
}

/// Call record for `approve_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveCall {
    pub pr_number: u64,
    pub commit_id: String,
    pub body: String,
}

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_number: u64,
    pub method: MergeMethod,
}

/// Simple in-memory GitHub for testing
///
/// Mutations feed back into later reads: comments and approvals are
/// recorded under `steward_id`, and a successful merge marks the PR merged,
/// so repeated evaluations see the effects of earlier ones.
///
/// Features:
/// - Call tracking for verification (every method, in order)
/// - Configurable responses per PR / ref / URL
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    steward_id: u64,
    capability: Mutex<RepositoryMergeCapability>,
    reviews: Mutex<HashMap<u64, Vec<PrReview>>>,
    pr_states: Mutex<HashMap<u64, PullRequestState>>,
    comments: Mutex<HashMap<u64, Vec<PrComment>>>,
    contents: Mutex<HashMap<(String, String), RepoContent>>,
    required_checks: Mutex<HashMap<String, Vec<String>>>,
    check_suites: Mutex<HashMap<String, Vec<CheckSuiteSummary>>>,
    check_runs: Mutex<HashMap<String, Vec<CheckRunResult>>>,
    merge_responses: Mutex<HashMap<u64, MergeResult>>,
    // Call tracking
    calls: Mutex<Vec<String>>,
    create_comment_calls: Mutex<Vec<CreateCommentCall>>,
    approve_calls: Mutex<Vec<ApproveCall>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    check_runs_calls: Mutex<Vec<String>>,
    // Error injection
    error_on_get_content: Mutex<Option<String>>,
    error_on_list_comments: Mutex<Option<String>>,
    error_on_create_comment: Mutex<Option<String>>,
    error_on_check_runs: Mutex<Option<String>>,
    error_on_approve: Mutex<Option<String>>,
    error_on_merge_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config; writes are attributed to `steward_id`
    pub fn with_config(config: PlatformConfig, steward_id: u64) -> Self {
        Self {
            config,
            steward_id,
            capability: Mutex::new(RepositoryMergeCapability {
                allow_merge_commit: true,
                allow_squash_merge: true,
                allow_rebase_merge: true,
            }),
            reviews: Mutex::new(HashMap::new()),
            pr_states: Mutex::new(HashMap::new()),
            comments: Mutex::new(HashMap::new()),
            contents: Mutex::new(HashMap::new()),
            required_checks: Mutex::new(HashMap::new()),
            check_suites: Mutex::new(HashMap::new()),
            check_runs: Mutex::new(HashMap::new()),
            merge_responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            create_comment_calls: Mutex::new(Vec::new()),
            approve_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            check_runs_calls: Mutex::new(Vec::new()),
            error_on_get_content: Mutex::new(None),
            error_on_list_comments: Mutex::new(None),
            error_on_create_comment: Mutex::new(None),
            error_on_check_runs: Mutex::new(None),
            error_on_approve: Mutex::new(None),
            error_on_merge_pr: Mutex::new(None),
        }
    }

    // === Error injection methods ===

    /// Make `get_content` return an error
    pub fn fail_get_content(&self, msg: &str) {
        *self.error_on_get_content.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_pr_comments` return an error
    pub fn fail_list_comments(&self, msg: &str) {
        *self.error_on_list_comments.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr_comment` return an error
    pub fn fail_create_comment(&self, msg: &str) {
        *self.error_on_create_comment.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_check_runs` return an error
    pub fn fail_check_runs(&self, msg: &str) {
        *self.error_on_check_runs.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `approve_pr` return an error
    pub fn fail_approve(&self, msg: &str) {
        *self.error_on_approve.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pr` return an error
    pub fn fail_merge_pr(&self, msg: &str) {
        *self.error_on_merge_pr.lock().unwrap() = Some(msg.to_string());
    }

    // === Response setup ===

    /// Set the repository merge settings
    pub fn set_capability(&self, capability: RepositoryMergeCapability) {
        *self.capability.lock().unwrap() = capability;
    }

    /// Set the state returned by `get_pr_state`
    pub fn set_pr_state(&self, pr_number: u64, merged: bool, author_id: Option<u64>) {
        self.pr_states.lock().unwrap().insert(
            pr_number,
            PullRequestState {
                number: pr_number,
                merged,
                author_id,
            },
        );
    }

    /// Add a review by `reviewer_id`
    pub fn add_review(&self, pr_number: u64, reviewer_id: u64) {
        let mut reviews = self.reviews.lock().unwrap();
        let list = reviews.entry(pr_number).or_default();
        let id = list.len() as u64 + 1;
        list.push(PrReview {
            id,
            reviewer_id: Some(reviewer_id),
        });
    }

    /// Add a comment by `author_id`
    pub fn add_comment(&self, pr_number: u64, author_id: u64, body: &str) {
        let mut comments = self.comments.lock().unwrap();
        let list = comments.entry(pr_number).or_default();
        let id = list.len() as u64 + 1;
        list.push(PrComment {
            id,
            author_id: Some(author_id),
            body: body.to_string(),
        });
    }

    /// Set the raw contents API answer for a path at a ref
    pub fn set_content(&self, path: &str, git_ref: &str, content: RepoContent) {
        self.contents
            .lock()
            .unwrap()
            .insert((path.to_string(), git_ref.to_string()), content);
    }

    /// Serve `yaml` as `.steward.yml` on `git_ref`
    pub fn set_config_yaml(&self, git_ref: &str, yaml: &str) {
        // Mimic the API's line-wrapped base64
        let encoded = STANDARD.encode(yaml);
        let wrapped = encoded
            .as_bytes()
            .chunks(60)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("\n");
        self.set_content(
            ".steward.yml",
            git_ref,
            RepoContent::File { encoded: wrapped },
        );
    }

    /// Set required status check contexts for a branch
    pub fn set_required_checks(&self, branch: &str, contexts: &[&str]) {
        self.required_checks.lock().unwrap().insert(
            branch.to_string(),
            contexts.iter().map(ToString::to_string).collect(),
        );
    }

    /// Set the check suites listed for a ref
    pub fn set_check_suites(&self, git_ref: &str, suites: Vec<CheckSuiteSummary>) {
        self.check_suites
            .lock()
            .unwrap()
            .insert(git_ref.to_string(), suites);
    }

    /// Set the check runs behind a `check_runs_url`
    pub fn set_check_runs(&self, url: &str, runs: Vec<CheckRunResult>) {
        self.check_runs
            .lock()
            .unwrap()
            .insert(url.to_string(), runs);
    }

    /// Set the response for `merge_pr` for a specific PR
    pub fn set_merge_response(&self, pr_number: u64, result: MergeResult) {
        self.merge_responses
            .lock()
            .unwrap()
            .insert(pr_number, result);
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    // === Call verification methods ===

    /// Names of every trait method called, in order
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Get all `create_pr_comment` calls
    pub fn get_create_comment_calls(&self) -> Vec<CreateCommentCall> {
        self.create_comment_calls.lock().unwrap().clone()
    }

    /// Get all `approve_pr` calls
    pub fn get_approve_calls(&self) -> Vec<ApproveCall> {
        self.approve_calls.lock().unwrap().clone()
    }

    /// Get all `merge_pr` calls
    pub fn get_merge_pr_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    /// URLs passed to `list_check_runs`
    pub fn get_check_runs_calls(&self) -> Vec<String> {
        self.check_runs_calls.lock().unwrap().clone()
    }

    /// Assert that nothing was written to GitHub
    pub fn assert_no_mutation(&self) {
        let approvals = self.get_approve_calls();
        let merges = self.get_merge_pr_calls();
        assert!(
            approvals.is_empty() && merges.is_empty(),
            "Expected no approve/merge calls but got: {approvals:?} {merges:?}"
        );
    }

    /// Assert that `merge_pr` was called with a specific method
    pub fn assert_merge_called_with_method(&self, pr_number: u64, method: MergeMethod) {
        let calls = self.get_merge_pr_calls();
        assert!(
            calls.iter().any(|c| c.pr_number == pr_number && c.method == method),
            "Expected merge_pr({pr_number}, {method:?}) but got: {calls:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    fn config(&self) -> &PlatformConfig {
        &self.config
    }

    async fn get_merge_capability(&self) -> Result<RepositoryMergeCapability> {
        self.record("get_merge_capability");
        Ok(*self.capability.lock().unwrap())
    }

    async fn list_pr_reviews(&self, pr_number: u64) -> Result<Vec<PrReview>> {
        self.record("list_pr_reviews");
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_pr_state(&self, pr_number: u64) -> Result<PullRequestState> {
        self.record("get_pr_state");
        let states = self.pr_states.lock().unwrap();
        states.get(&pr_number).cloned().ok_or_else(|| {
            Error::GitHubApi(format!("get_pr_state: no response configured for PR #{pr_number}"))
        })
    }

    async fn list_pr_comments(&self, pr_number: u64) -> Result<Vec<PrComment>> {
        self.record("list_pr_comments");

        // Check for injected error
        if let Some(msg) = self.error_on_list_comments.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(self
            .comments
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        self.record("create_pr_comment");
        self.create_comment_calls
            .lock()
            .unwrap()
            .push(CreateCommentCall {
                pr_number,
                body: body.to_string(),
            });

        // Check for injected error
        if let Some(msg) = self.error_on_create_comment.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        self.add_comment(pr_number, self.steward_id, body);
        Ok(())
    }

    async fn get_content(&self, path: &str, git_ref: &str) -> Result<RepoContent> {
        self.record("get_content");

        // Check for injected error
        if let Some(msg) = self.error_on_get_content.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(self
            .contents
            .lock()
            .unwrap()
            .get(&(path.to_string(), git_ref.to_string()))
            .cloned()
            .unwrap_or(RepoContent::Missing))
    }

    async fn list_required_status_checks(&self, branch: &str) -> Result<Vec<String>> {
        self.record("list_required_status_checks");
        Ok(self
            .required_checks
            .lock()
            .unwrap()
            .get(branch)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_check_suites(&self, git_ref: &str) -> Result<Vec<CheckSuiteSummary>> {
        self.record("list_check_suites");
        Ok(self
            .check_suites
            .lock()
            .unwrap()
            .get(git_ref)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_check_runs(&self, check_runs_url: &str) -> Result<Vec<CheckRunResult>> {
        self.record("list_check_runs");
        self.check_runs_calls
            .lock()
            .unwrap()
            .push(check_runs_url.to_string());

        // Check for injected error
        if let Some(msg) = self.error_on_check_runs.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(self
            .check_runs
            .lock()
            .unwrap()
            .get(check_runs_url)
            .cloned()
            .unwrap_or_default())
    }

    async fn approve_pr(&self, pr_number: u64, commit_id: &str, body: &str) -> Result<()> {
        self.record("approve_pr");
        self.approve_calls.lock().unwrap().push(ApproveCall {
            pr_number,
            commit_id: commit_id.to_string(),
            body: body.to_string(),
        });

        // Check for injected error
        if let Some(msg) = self.error_on_approve.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        self.add_review(pr_number, self.steward_id);
        Ok(())
    }

    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult> {
        self.record("merge_pr");
        self.merge_pr_calls
            .lock()
            .unwrap()
            .push(MergePrCall { pr_number, method });

        // Check for injected error
        if let Some(msg) = self.error_on_merge_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let result = self
            .merge_responses
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or(MergeResult {
                merged: true,
                sha: Some(format!("merged_sha_{pr_number}")),
                message: None,
            });

        if result.merged
            && let Some(state) = self.pr_states.lock().unwrap().get_mut(&pr_number)
        {
            state.merged = true;
        }
        Ok(result)
    }
}
