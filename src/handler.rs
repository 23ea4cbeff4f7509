//! Entry point for one `check_suite` delivery

use crate::accounts::Accounts;
use crate::error::Result;
use crate::event::{CheckSuiteAction, CheckSuiteEvent};
use crate::merge::{MergeOutcome, execute_merge};
use crate::platform::PlatformService;
use crate::policy::{EligibilityDecision, PolicyEngine};
use tracing::{debug, info};

/// Options for handling a delivery
#[derive(Debug, Clone, Copy, Default)]
pub struct HandleOptions {
    /// Evaluate only; never approve or merge
    pub dry_run: bool,
}

/// What happened to a delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Not a `completed` action; nothing was evaluated
    Ignored(CheckSuiteAction),
    /// The policy ran
    Decided {
        /// The policy decision
        decision: EligibilityDecision,
        /// Merge outcome, when the decision allowed a merge and this was not a dry run
        merge: Option<MergeOutcome>,
    },
}

/// Evaluate the policy for a delivery and, if allowed, approve and merge
pub async fn handle_check_suite(
    platform: &dyn PlatformService,
    event: &CheckSuiteEvent,
    accounts: Accounts,
    options: HandleOptions,
) -> Result<Evaluation> {
    if !event.is_completed() {
        debug!(action = ?event.action, "ignoring check_suite action");
        return Ok(Evaluation::Ignored(event.action));
    }

    let decision = PolicyEngine::new(platform, accounts).evaluate(event).await?;

    let merge = if !decision.is_allowed() {
        None
    } else if options.dry_run {
        info!(%decision, "dry run, not merging");
        None
    } else {
        Some(execute_merge(platform, &decision).await?)
    };

    Ok(Evaluation::Decided { decision, merge })
}
