//! Merge eligibility policy
//!
//! Guards run strictly in this order, and the first failing one ends the
//! evaluation without further API calls:
//!
//! | # | Guard | Veto |
//! |---|-------|------|
//! | 1 | pull request attached to the suite | `NoAssociatedPr` |
//! | 2 | head and base in the same repository | `ForkPr` |
//! | 3 | no prior review by steward | `AlreadyReviewed` |
//! | 4 | not merged yet | `AlreadyMerged` |
//! | 5 | authored by the update bot | `NotFromBot` |
//! | 6 | `.steward.yml` usable and enabling the ecosystem | `ConfigInvalid` / `GloballyDisabled` / `EcosystemDisabled` |
//! | 7 | required checks passed | `ChecksPending` / `ChecksFailed` |

mod decision;
mod engine;
pub mod guards;

pub use decision::{EligibilityDecision, VetoReason};
pub use engine::PolicyEngine;
