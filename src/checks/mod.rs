//! Check-status aggregation
//!
//! Decides whether the required status checks of the base branch are
//! satisfied by the check runs reported for the head commit.

use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::{CheckRunResult, CheckSuiteStatus, CheckSuiteSummary};
use futures::future::try_join_all;
use std::collections::BTreeSet;
use tracing::debug;

/// Aggregated check state of a head commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Nothing blocks the merge
    Pass,
    /// At least one check suite is still running
    Pending,
    /// Required checks without a passing run
    Fail {
        /// Missing or failed required check names, sorted
        missing: Vec<String>,
    },
}

/// Suites that actually carry check runs
pub fn valid_suites(suites: &[CheckSuiteSummary]) -> Vec<&CheckSuiteSummary> {
    suites.iter().filter(|suite| suite.is_valid()).collect()
}

/// Names of passed runs across all suites
pub fn passed_run_names<'a, I>(runs: I) -> BTreeSet<&'a str>
where
    I: IntoIterator<Item = &'a CheckRunResult>,
{
    runs.into_iter()
        .filter(|run| run.passed())
        .map(|run| run.name.as_str())
        .collect()
}

/// Required checks that are not in `passed`
pub fn missing_required(required: &[String], passed: &BTreeSet<&str>) -> Vec<String> {
    let missing: BTreeSet<&String> = required
        .iter()
        .filter(|name| !passed.contains(name.as_str()))
        .collect();
    missing.into_iter().cloned().collect()
}

/// Fetches suites, rules and runs and folds them into a [`CheckStatus`]
pub struct CheckAggregator<'a> {
    platform: &'a dyn PlatformService,
}

impl<'a> CheckAggregator<'a> {
    /// Create an aggregator
    pub const fn new(platform: &'a dyn PlatformService) -> Self {
        Self { platform }
    }

    /// Evaluate the checks of `head` (a commit SHA or branch) against the
    /// required status checks of `base_ref`
    pub async fn aggregate(&self, head: &str, base_ref: &str) -> Result<CheckStatus> {
        let suites = self.platform.list_check_suites(head).await?;
        if suites.is_empty() {
            debug!(head, "no check suites");
            return Ok(CheckStatus::Pass);
        }

        let valid = valid_suites(&suites);
        if valid.is_empty() {
            debug!(head, total = suites.len(), "no check suite has check runs");
            return Ok(CheckStatus::Pass);
        }

        if let Some(running) = valid
            .iter()
            .find(|suite| suite.status != CheckSuiteStatus::Completed)
        {
            debug!(head, suite_id = running.id, status = ?running.status, "check suite not completed");
            return Ok(CheckStatus::Pending);
        }

        let required = self.platform.list_required_status_checks(base_ref).await?;
        if required.is_empty() {
            debug!(base_ref, "no required status checks");
            return Ok(CheckStatus::Pass);
        }

        // All suites must be fetched; one failed listing fails the evaluation
        let runs_per_suite = try_join_all(
            valid
                .iter()
                .map(|suite| self.platform.list_check_runs(&suite.check_runs_url)),
        )
        .await?;

        let passed = passed_run_names(runs_per_suite.iter().flatten());
        let missing = missing_required(&required, &passed);
        debug!(head, ?required, ?passed, ?missing, "checked required status checks");

        if missing.is_empty() {
            Ok(CheckStatus::Pass)
        } else {
            Ok(CheckStatus::Fail { missing })
        }
    }
}
