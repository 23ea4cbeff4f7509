//! Shared fixtures for steward tests

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::{ApproveCall, CreateCommentCall, MergePrCall, MockPlatformService};

use serde_json::json;
use dependabot_steward::accounts::Accounts;
use dependabot_steward::event::CheckSuiteEvent;
use dependabot_steward::types::{
    CheckConclusion, CheckRunResult, CheckSuiteStatus, CheckSuiteSummary, PlatformConfig,
};

pub const BOT_ID: u64 = 1001;
pub const STEWARD_ID: u64 = 2002;
pub const HUMAN_ID: u64 = 3003;
pub const REPO_ID: u64 = 77;
pub const FORK_REPO_ID: u64 = 88;
pub const PR_NUMBER: u64 = 42;
pub const HEAD_REF: &str = "dependabot/npm_and_yarn/lodash-4.17.21";
pub const HEAD_SHA: &str = "0123456789abcdef0123456789abcdef01234567";
pub const BASE_REF: &str = "main";

/// Test account IDs
pub const fn accounts() -> Accounts {
    Accounts {
        update_bot_id: BOT_ID,
        steward_id: STEWARD_ID,
    }
}

pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        api_url: "https://api.github.com".to_string(),
    }
}

pub fn mock_platform() -> MockPlatformService {
    MockPlatformService::with_config(github_config(), STEWARD_ID)
}

/// A mock where PR #42 passes every guard: bot-authored, unmerged,
/// unreviewed, no config file, no check suites
pub fn eligible_platform() -> MockPlatformService {
    let platform = mock_platform();
    platform.set_pr_state(PR_NUMBER, false, Some(BOT_ID));
    platform
}

/// A completed `check_suite` delivery with PR #42 attached
pub fn completed_event() -> CheckSuiteEvent {
    event_with(
        "completed",
        json!([pull_request_json(HEAD_REF, REPO_ID)]),
    )
}

/// A completed delivery for a PR whose head branch is `head_ref`
pub fn completed_event_for_branch(head_ref: &str) -> CheckSuiteEvent {
    event_with(
        "completed",
        json!([pull_request_json(head_ref, REPO_ID)]),
    )
}

/// A completed delivery for a PR opened from a fork
pub fn fork_event() -> CheckSuiteEvent {
    event_with(
        "completed",
        json!([pull_request_json(HEAD_REF, FORK_REPO_ID)]),
    )
}

/// A completed delivery without attached pull requests
pub fn orphan_event() -> CheckSuiteEvent {
    event_with("completed", json!([]))
}

/// A delivery with the given action and PR #42 attached
pub fn event_with_action(action: &str) -> CheckSuiteEvent {
    event_with(action, json!([pull_request_json(HEAD_REF, REPO_ID)]))
}

pub fn pull_request_json(head_ref: &str, head_repo_id: u64) -> serde_json::Value {
    json!({
        "url": format!("https://api.github.com/repos/acme/widgets/pulls/{PR_NUMBER}"),
        "id": 9000,
        "number": PR_NUMBER,
        "head": {"ref": head_ref, "sha": HEAD_SHA, "repo": {"id": head_repo_id}},
        "base": {"ref": BASE_REF, "sha": "fedcba", "repo": {"id": REPO_ID}}
    })
}

pub fn event_json(action: &str, pull_requests: serde_json::Value) -> serde_json::Value {
    json!({
        "action": action,
        "check_suite": {
            "id": 555,
            "head_branch": HEAD_REF,
            "head_sha": HEAD_SHA,
            "status": "completed",
            "conclusion": "success",
            "pull_requests": pull_requests
        },
        "repository": {"id": REPO_ID, "name": "widgets", "owner": {"login": "acme"}}
    })
}

fn event_with(action: &str, pull_requests: serde_json::Value) -> CheckSuiteEvent {
    CheckSuiteEvent::from_json(&event_json(action, pull_requests).to_string())
        .expect("fixture payload parses")
}

/// A check suite with `runs` check runs, served at a URL derived from `id`
pub fn make_suite(id: u64, status: CheckSuiteStatus, runs: u64) -> CheckSuiteSummary {
    CheckSuiteSummary {
        id,
        status,
        conclusion: (status == CheckSuiteStatus::Completed).then_some(CheckConclusion::Success),
        latest_check_runs_count: runs,
        check_runs_url: suite_runs_url(id),
    }
}

pub fn suite_runs_url(id: u64) -> String {
    format!("https://api.github.com/repos/acme/widgets/check-suites/{id}/check-runs")
}

pub fn make_run(name: &str, conclusion: Option<CheckConclusion>) -> CheckRunResult {
    CheckRunResult {
        name: name.to_string(),
        conclusion,
    }
}
