//! Guard predicates of the merge policy
//!
//! Pure functions over already-fetched state. Each one either lets the
//! evaluation continue or breaks with the veto reason; the engine runs them
//! in a fixed order and stops at the first break.

use crate::checks::CheckStatus;
use crate::config::{ConfigResolution, Enablement, StewardConfig};
use crate::ecosystem::Ecosystem;
use crate::event::CheckSuiteEvent;
use crate::policy::VetoReason;
use crate::types::{PrReview, PullRequestCandidate, PullRequestState};
use std::ops::ControlFlow;

/// Continue with a value, or stop with a veto
pub type Guard<T = ()> = ControlFlow<VetoReason, T>;

/// 1. A pull request is attached to the check suite
pub fn attached_pull_request(event: &CheckSuiteEvent) -> Guard<PullRequestCandidate> {
    event
        .candidate()
        .map_or(ControlFlow::Break(VetoReason::NoAssociatedPr), ControlFlow::Continue)
}

/// 2. Head and base live in the same repository
pub fn same_repository(candidate: &PullRequestCandidate) -> Guard {
    if candidate.head_repo_id == candidate.base_repo_id {
        ControlFlow::Continue(())
    } else {
        ControlFlow::Break(VetoReason::ForkPr)
    }
}

/// 3. Steward has not reviewed the pull request yet
pub fn not_reviewed_by(reviews: &[PrReview], steward_id: u64) -> Guard {
    if reviews.iter().any(|r| r.reviewer_id == Some(steward_id)) {
        ControlFlow::Break(VetoReason::AlreadyReviewed)
    } else {
        ControlFlow::Continue(())
    }
}

/// 4. The pull request is not merged yet
pub const fn not_merged(state: &PullRequestState) -> Guard {
    if state.merged {
        ControlFlow::Break(VetoReason::AlreadyMerged)
    } else {
        ControlFlow::Continue(())
    }
}

/// 5. The update bot opened the pull request
pub fn authored_by(state: &PullRequestState, update_bot_id: u64) -> Guard {
    if state.author_id == Some(update_bot_id) {
        ControlFlow::Continue(())
    } else {
        ControlFlow::Break(VetoReason::NotFromBot)
    }
}

/// 6a. `.steward.yml` is absent or valid
pub fn usable_configuration(resolution: &ConfigResolution) -> Guard<StewardConfig> {
    match resolution {
        ConfigResolution::Invalid(problem) => {
            ControlFlow::Break(VetoReason::ConfigInvalid(problem.clone()))
        }
        ConfigResolution::Resolved(config) => ControlFlow::Continue(config.clone()),
        ConfigResolution::Absent => ControlFlow::Continue(StewardConfig::default()),
    }
}

/// 6b. The configuration enables the branch's ecosystem
pub fn configuration_enabled(config: &StewardConfig, ecosystem: Ecosystem) -> Guard {
    match config.enablement(ecosystem) {
        Enablement::Enabled => ControlFlow::Continue(()),
        Enablement::GloballyDisabled => ControlFlow::Break(VetoReason::GloballyDisabled),
        Enablement::EcosystemDisabled(eco) => {
            ControlFlow::Break(VetoReason::EcosystemDisabled(eco))
        }
    }
}

/// 7. Required checks have passed
pub fn checks_passed(status: &CheckStatus) -> Guard {
    match status {
        CheckStatus::Pass => ControlFlow::Continue(()),
        CheckStatus::Pending => ControlFlow::Break(VetoReason::ChecksPending),
        CheckStatus::Fail { missing } => ControlFlow::Break(VetoReason::ChecksFailed(missing.clone())),
    }
}
