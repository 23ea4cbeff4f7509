//! Merge execution - effectful operations
//!
//! Approves the pull request, then asks GitHub to merge it. The approval is
//! mandatory; the merge itself is allowed to fail.

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::policy::EligibilityDecision;
use tracing::{error, info};

/// Body of the approving review
pub const APPROVAL_BODY: &str = "Approved by steward.";

/// Result of merge execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// GitHub merged the pull request
    Merged {
        /// The SHA of the merge commit, when reported
        sha: Option<String>,
    },
    /// The merge call failed or GitHub declined; the approval stays
    Rejected {
        /// Error or API message
        message: String,
    },
}

impl MergeOutcome {
    /// Check if the pull request was merged
    #[must_use]
    pub const fn is_merged(&self) -> bool {
        matches!(self, Self::Merged { .. })
    }
}

/// Approve and merge the pull request of an allowed decision (EFFECTFUL)
///
/// A failed approval is returned as an error and no merge is attempted.
/// A failed merge is logged and reported as [`MergeOutcome::Rejected`]:
/// conflicts and branch-protection races clear up on a later delivery.
pub async fn execute_merge(
    platform: &dyn PlatformService,
    decision: &EligibilityDecision,
) -> Result<MergeOutcome> {
    let (Some(pr_number), Some(method), Some(head_sha), true) = (
        decision.pull_number(),
        decision.merge_method(),
        decision.head_sha(),
        decision.is_allowed(),
    ) else {
        return Err(Error::Internal(format!(
            "refusing to merge on a non-allowing decision ({decision})"
        )));
    };

    platform
        .approve_pr(pr_number, head_sha, APPROVAL_BODY)
        .await?;
    info!(pr_number, head_sha, "approved pull request");

    let outcome = match platform.merge_pr(pr_number, method).await {
        Ok(result) if result.merged => MergeOutcome::Merged { sha: result.sha },
        Ok(result) => MergeOutcome::Rejected {
            message: result
                .message
                .unwrap_or_else(|| "merge not performed".to_string()),
        },
        Err(e) => MergeOutcome::Rejected {
            message: e.to_string(),
        },
    };

    match &outcome {
        MergeOutcome::Merged { sha } => info!(pr_number, %method, ?sha, "merged pull request"),
        MergeOutcome::Rejected { message } => {
            error!(pr_number, %method, %message, "merge failed");
        }
    }
    Ok(outcome)
}
