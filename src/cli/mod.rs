//! CLI commands

pub mod context;
pub mod evaluate;
pub mod style;

pub use evaluate::{EvaluateOptions, run_evaluate};
