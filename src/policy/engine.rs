//! The merge eligibility policy engine

use crate::accounts::Accounts;
use crate::checks::CheckAggregator;
use crate::config::ConfigResolver;
use crate::ecosystem::Ecosystem;
use crate::error::{Error, Result};
use crate::event::CheckSuiteEvent;
use crate::merge::resolve_merge_method;
use crate::platform::PlatformService;
use crate::policy::guards::{self, Guard};
use crate::policy::{EligibilityDecision, VetoReason};
use std::ops::ControlFlow;
use tracing::{debug, info, warn};

/// Evaluates the guard chain for one `check_suite` delivery
pub struct PolicyEngine<'a> {
    platform: &'a dyn PlatformService,
    accounts: Accounts,
}

impl<'a> PolicyEngine<'a> {
    /// Create an engine for the repository `platform` is bound to
    pub const fn new(platform: &'a dyn PlatformService, accounts: Accounts) -> Self {
        Self { platform, accounts }
    }

    /// Run the guards in order and stop at the first veto
    ///
    /// Vetoes are returned as decisions. Errors are fatal: unexpected API
    /// failures, an unclassifiable head branch, or a repository that allows
    /// no merge method.
    pub async fn evaluate(&self, event: &CheckSuiteEvent) -> Result<EligibilityDecision> {
        let candidate = match guards::attached_pull_request(event) {
            ControlFlow::Continue(candidate) => candidate,
            ControlFlow::Break(reason) => {
                warn!(suite_id = event.check_suite.id, %reason, "merge vetoed");
                return Ok(EligibilityDecision::veto(None, reason));
            }
        };
        let pr_number = candidate.number;
        debug!(pr_number, head_ref = %candidate.head_ref, "evaluating pull request");

        if let Some(veto) = vetoed(pr_number, guards::same_repository(&candidate)) {
            return Ok(veto);
        }

        let reviews = self.platform.list_pr_reviews(pr_number).await?;
        if let Some(veto) = vetoed(
            pr_number,
            guards::not_reviewed_by(&reviews, self.accounts.steward_id),
        ) {
            return Ok(veto);
        }

        let state = self.platform.get_pr_state(pr_number).await?;
        if let Some(veto) = vetoed(pr_number, guards::not_merged(&state)) {
            return Ok(veto);
        }
        if let Some(veto) = vetoed(
            pr_number,
            guards::authored_by(&state, self.accounts.update_bot_id),
        ) {
            return Ok(veto);
        }

        let resolution = ConfigResolver::new(self.platform, self.accounts)
            .resolve(pr_number, &candidate.head_ref)
            .await?;
        let config = match guards::usable_configuration(&resolution) {
            ControlFlow::Continue(config) => config,
            ControlFlow::Break(reason) => return Ok(log_veto(pr_number, reason)),
        };
        let ecosystem = Ecosystem::classify(&candidate.head_ref)
            .ok_or_else(|| Error::UnknownEcosystem(candidate.head_ref.clone()))?;
        if let Some(veto) = vetoed(pr_number, guards::configuration_enabled(&config, ecosystem)) {
            return Ok(veto);
        }

        let status = CheckAggregator::new(self.platform)
            .aggregate(&candidate.head_sha, &candidate.base_ref)
            .await?;
        if let Some(veto) = vetoed(pr_number, guards::checks_passed(&status)) {
            return Ok(veto);
        }

        let method = resolve_merge_method(self.platform).await?;
        info!(pr_number, %ecosystem, %method, "pull request eligible for merge");
        Ok(EligibilityDecision::allow(
            pr_number,
            method,
            candidate.head_sha,
        ))
    }
}

/// Turn a broken guard into a logged veto decision
fn vetoed(pr_number: u64, guard: Guard) -> Option<EligibilityDecision> {
    match guard {
        ControlFlow::Continue(()) => None,
        ControlFlow::Break(reason) => Some(log_veto(pr_number, reason)),
    }
}

fn log_veto(pr_number: u64, reason: VetoReason) -> EligibilityDecision {
    if reason.is_pending() {
        info!(pr_number, %reason, "merge not ready");
    } else {
        warn!(pr_number, %reason, "merge vetoed");
    }
    EligibilityDecision::veto(Some(pr_number), reason)
}
