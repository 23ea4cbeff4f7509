//! Eligibility decision and veto reasons

use crate::config::ConfigProblem;
use crate::ecosystem::Ecosystem;
use crate::types::MergeMethod;
use std::fmt;

/// Why a guard blocked the merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VetoReason {
    /// The check suite has no pull request attached
    NoAssociatedPr,
    /// Head and base live in different repositories
    ForkPr,
    /// Steward already reviewed this pull request
    AlreadyReviewed,
    /// The pull request is already merged
    AlreadyMerged,
    /// The author is not the dependency-update bot
    NotFromBot,
    /// `.steward.yml` sets `enable: false`
    GloballyDisabled,
    /// `.steward.yml` disables the branch's ecosystem
    EcosystemDisabled(Ecosystem),
    /// `.steward.yml` is present but unusable
    ConfigInvalid(ConfigProblem),
    /// Some check suite has not completed yet
    ChecksPending,
    /// Required status checks without a passing run
    ChecksFailed(Vec<String>),
}

impl VetoReason {
    /// Whether this reason is expected to clear up on a later delivery
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::ChecksPending)
    }
}

impl fmt::Display for VetoReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAssociatedPr => write!(f, "no pull request attached to the check suite"),
            Self::ForkPr => write!(f, "pull request comes from a fork"),
            Self::AlreadyReviewed => write!(f, "already reviewed by steward"),
            Self::AlreadyMerged => write!(f, "already merged"),
            Self::NotFromBot => write!(f, "not authored by the dependency update bot"),
            Self::GloballyDisabled => write!(f, "disabled by configuration"),
            Self::EcosystemDisabled(eco) => write!(f, "{eco} disabled by configuration"),
            Self::ConfigInvalid(problem) => write!(f, "{problem}"),
            Self::ChecksPending => write!(f, "checks still running"),
            Self::ChecksFailed(missing) => {
                write!(f, "required checks not passing: {}", missing.join(", "))
            }
        }
    }
}

/// Outcome of one policy evaluation
///
/// Built once at the end of the guard chain and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityDecision {
    allow: bool,
    veto_reason: Option<VetoReason>,
    merge_method: Option<MergeMethod>,
    pull_number: Option<u64>,
    head_sha: Option<String>,
}

impl EligibilityDecision {
    /// Every guard passed
    pub const fn allow(pull_number: u64, merge_method: MergeMethod, head_sha: String) -> Self {
        Self {
            allow: true,
            veto_reason: None,
            merge_method: Some(merge_method),
            pull_number: Some(pull_number),
            head_sha: Some(head_sha),
        }
    }

    /// A guard blocked the merge
    pub const fn veto(pull_number: Option<u64>, reason: VetoReason) -> Self {
        Self {
            allow: false,
            veto_reason: Some(reason),
            merge_method: None,
            pull_number,
            head_sha: None,
        }
    }

    /// Whether the merge may proceed
    pub const fn is_allowed(&self) -> bool {
        self.allow
    }

    /// The blocking reason, for vetoes
    pub const fn veto_reason(&self) -> Option<&VetoReason> {
        self.veto_reason.as_ref()
    }

    /// Method to merge with, for allowed decisions
    pub const fn merge_method(&self) -> Option<MergeMethod> {
        self.merge_method
    }

    /// The evaluated pull request, when one was attached
    pub const fn pull_number(&self) -> Option<u64> {
        self.pull_number
    }

    /// Head commit the approval is pinned to, for allowed decisions
    pub fn head_sha(&self) -> Option<&str> {
        self.head_sha.as_deref()
    }
}

impl fmt::Display for EligibilityDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.veto_reason, self.pull_number, self.merge_method) {
            (None, Some(number), Some(method)) => write!(f, "allow merge of #{number} via {method}"),
            (Some(reason), Some(number), _) => write!(f, "veto #{number}: {reason}"),
            (Some(reason), None, _) => write!(f, "veto: {reason}"),
            _ => write!(f, "undecided"),
        }
    }
}
