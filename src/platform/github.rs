//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    CheckRunResult, CheckSuiteSummary, MergeMethod, MergeResult, PlatformConfig, PrComment,
    PrReview, PullRequestState, RepoContent, RepositoryMergeCapability,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Page size used for raw listing requests
const PER_PAGE: usize = 100;

/// A page of a listing endpoint
trait Paged {
    type Item;

    /// Total number of items across all pages, when the endpoint reports it
    fn total_count(&self) -> Option<usize>;

    fn into_items(self) -> Vec<Self::Item>;
}

#[derive(Deserialize)]
struct CheckSuitesPage {
    total_count: usize,
    check_suites: Vec<CheckSuiteSummary>,
}

impl Paged for CheckSuitesPage {
    type Item = CheckSuiteSummary;

    fn total_count(&self) -> Option<usize> {
        Some(self.total_count)
    }

    fn into_items(self) -> Vec<CheckSuiteSummary> {
        self.check_suites
    }
}

#[derive(Deserialize)]
struct CheckRunsPage {
    total_count: usize,
    check_runs: Vec<CheckRunResult>,
}

impl Paged for CheckRunsPage {
    type Item = CheckRunResult;

    fn total_count(&self) -> Option<usize> {
        Some(self.total_count)
    }

    fn into_items(self) -> Vec<CheckRunResult> {
        self.check_runs
    }
}

/// One entry of `GET /repos/{owner}/{repo}/rules/branches/{branch}`
#[derive(Deserialize)]
struct BranchRule {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    parameters: Option<BranchRuleParameters>,
}

#[derive(Deserialize)]
struct BranchRuleParameters {
    #[serde(default)]
    required_status_checks: Vec<RequiredStatusCheck>,
}

#[derive(Deserialize)]
struct RequiredStatusCheck {
    context: String,
}

impl Paged for Vec<BranchRule> {
    type Item = BranchRule;

    fn total_count(&self) -> Option<usize> {
        None
    }

    fn into_items(self) -> Vec<BranchRule> {
        self
    }
}

/// Single-object response of the contents API
#[derive(Deserialize)]
struct ContentEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Option<String>,
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests (contents, rules, checks)
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
}

impl GitHubService {
    /// Create a new GitHub service for one repository
    pub fn new(token: &str, config: PlatformConfig) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(config.api_url.as_str())
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("dependabot-steward")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
        })
    }

    /// Build a URL below `/repos/{owner}/{repo}`
    fn repo_url(&self, suffix: &str) -> Result<Url> {
        let raw = format!(
            "{}/repos/{}/{}/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.owner,
            self.config.repo,
            suffix
        );
        Url::parse(&raw).map_err(|e| Error::Internal(format!("invalid API URL '{raw}': {e}")))
    }

    async fn send_get(&self, url: Url) -> Result<reqwest::Response> {
        self.http_client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(Into::into)
    }

    /// Fetch every page of a listing endpoint
    async fn get_all_pages<P>(&self, url: Url, what: &str) -> Result<Vec<P::Item>>
    where
        P: Paged + DeserializeOwned,
    {
        let mut items = Vec::new();
        for page in 1.. {
            let mut page_url = url.clone();
            page_url
                .query_pairs_mut()
                .append_pair("per_page", &PER_PAGE.to_string())
                .append_pair("page", &page.to_string());

            let response = self.send_get(page_url).await?;
            if !response.status().is_success() {
                return Err(Error::GitHubApi(format!(
                    "Failed to fetch {what}: HTTP {}",
                    response.status()
                )));
            }

            let body: P = response
                .json()
                .await
                .map_err(|e| Error::GitHubApi(format!("Failed to parse {what}: {e}")))?;
            let total = body.total_count();
            let batch = body.into_items();
            let batch_len = batch.len();
            items.extend(batch);

            if batch_len < PER_PAGE || total.is_some_and(|t| items.len() >= t) {
                break;
            }
        }
        debug!(what, count = items.len(), "fetched all pages");
        Ok(items)
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    fn config(&self) -> &PlatformConfig {
        &self.config
    }

    async fn get_merge_capability(&self) -> Result<RepositoryMergeCapability> {
        debug!(owner = %self.config.owner, repo = %self.config.repo, "getting merge settings");
        let repo = self
            .client
            .repos(&self.config.owner, &self.config.repo)
            .get()
            .await?;

        Ok(RepositoryMergeCapability {
            allow_merge_commit: repo.allow_merge_commit.unwrap_or(false),
            allow_squash_merge: repo.allow_squash_merge.unwrap_or(false),
            allow_rebase_merge: repo.allow_rebase_merge.unwrap_or(false),
        })
    }

    async fn list_pr_reviews(&self, pr_number: u64) -> Result<Vec<PrReview>> {
        debug!(pr_number, "listing PR reviews");
        let first = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list_reviews(pr_number)
            .send()
            .await?;
        let reviews = self.client.all_pages(first).await?;

        let result: Vec<PrReview> = reviews
            .into_iter()
            .map(|r| PrReview {
                id: r.id.0,
                reviewer_id: r.user.map(|u| u.id.0),
            })
            .collect();
        debug!(pr_number, count = result.len(), "listed PR reviews");
        Ok(result)
    }

    async fn get_pr_state(&self, pr_number: u64) -> Result<PullRequestState> {
        debug!(pr_number, "getting PR state");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(pr_number)
            .await?;

        let state = PullRequestState {
            number: pr.number,
            merged: pr.merged.unwrap_or(false) || pr.merged_at.is_some(),
            author_id: pr.user.as_ref().map(|u| u.id.0),
        };
        debug!(pr_number, merged = state.merged, author_id = ?state.author_id, "got PR state");
        Ok(state)
    }

    async fn list_pr_comments(&self, pr_number: u64) -> Result<Vec<PrComment>> {
        debug!(pr_number, "listing PR comments");
        let first = self
            .client
            .issues(&self.config.owner, &self.config.repo)
            .list_comments(pr_number)
            .send()
            .await?;
        let comments = self.client.all_pages(first).await?;

        let result: Vec<PrComment> = comments
            .into_iter()
            .map(|c| PrComment {
                id: c.id.0,
                author_id: Some(c.user.id.0),
                body: c.body.unwrap_or_default(),
            })
            .collect();
        debug!(pr_number, count = result.len(), "listed PR comments");
        Ok(result)
    }

    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        debug!(pr_number, "creating PR comment");
        self.client
            .issues(&self.config.owner, &self.config.repo)
            .create_comment(pr_number, body)
            .await?;
        debug!(pr_number, "created PR comment");
        Ok(())
    }

    async fn get_content(&self, path: &str, git_ref: &str) -> Result<RepoContent> {
        debug!(path, git_ref, "fetching repository content");
        let mut url = self.repo_url(&format!("contents/{path}"))?;
        url.query_pairs_mut().append_pair("ref", git_ref);

        let response = self.send_get(url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(path, git_ref, "content not found");
            return Ok(RepoContent::Missing);
        }
        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Failed to fetch {path}@{git_ref}: HTTP {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse contents response: {e}")))?;

        // Directories come back as an array of entries
        if body.is_array() {
            return Ok(RepoContent::NotAFile);
        }

        let entry: ContentEntry = serde_json::from_value(body)
            .map_err(|e| Error::GitHubApi(format!("Failed to parse contents response: {e}")))?;
        if entry.kind != "file" {
            debug!(path, kind = %entry.kind, "content is not a regular file");
            return Ok(RepoContent::NotAFile);
        }

        Ok(RepoContent::File {
            encoded: entry.content.unwrap_or_default(),
        })
    }

    async fn list_required_status_checks(&self, branch: &str) -> Result<Vec<String>> {
        debug!(branch, "listing required status checks");
        let url = self.repo_url(&format!("rules/branches/{}", urlencoding::encode(branch)))?;
        let rules = self
            .get_all_pages::<Vec<BranchRule>>(url, "branch rules")
            .await?;

        let mut contexts: Vec<String> = rules
            .into_iter()
            .filter(|rule| rule.kind == "required_status_checks")
            .filter_map(|rule| rule.parameters)
            .flat_map(|params| params.required_status_checks)
            .map(|check| check.context)
            .collect();
        contexts.sort();
        contexts.dedup();

        debug!(branch, ?contexts, "listed required status checks");
        Ok(contexts)
    }

    async fn list_check_suites(&self, git_ref: &str) -> Result<Vec<CheckSuiteSummary>> {
        debug!(git_ref, "listing check suites");
        let url = self.repo_url(&format!(
            "commits/{}/check-suites",
            urlencoding::encode(git_ref)
        ))?;
        self.get_all_pages::<CheckSuitesPage>(url, "check suites")
            .await
    }

    async fn list_check_runs(&self, check_runs_url: &str) -> Result<Vec<CheckRunResult>> {
        debug!(check_runs_url, "listing check runs");
        let url = Url::parse(check_runs_url).map_err(|e| {
            Error::GitHubApi(format!("invalid check_runs_url '{check_runs_url}': {e}"))
        })?;
        self.get_all_pages::<CheckRunsPage>(url, "check runs").await
    }

    async fn approve_pr(&self, pr_number: u64, commit_id: &str, body: &str) -> Result<()> {
        debug!(pr_number, commit_id, "approving PR");
        let route = format!(
            "/repos/{}/{}/pulls/{pr_number}/reviews",
            self.config.owner, self.config.repo
        );
        let review = serde_json::json!({
            "commit_id": commit_id,
            "body": body,
            "event": "APPROVE",
        });
        let _created: serde_json::Value = self.client.post(route, Some(&review)).await?;
        debug!(pr_number, "approved PR");
        Ok(())
    }

    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult> {
        debug!(pr_number, %method, "merging PR");

        let octocrab_method = match method {
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let result = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .merge(pr_number)
            .method(octocrab_method)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge failed: {e}")))?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }
}
