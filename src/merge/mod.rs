//! Merge strategy selection and execution

mod execute;
mod method;

pub use execute::{APPROVAL_BODY, MergeOutcome, execute_merge};
pub use method::{resolve_merge_method, select_merge_method};
