//! Evaluate command - run the merge policy for one `check_suite` delivery

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, cross};
use anstream::println;
use dependabot_steward::accounts::Accounts;
use dependabot_steward::error::Result;
use dependabot_steward::merge::MergeOutcome;
use dependabot_steward::{Evaluation, HandleOptions, handle_check_suite};
use std::path::Path;

/// Options for the evaluate command
#[derive(Debug, Clone, Default)]
pub struct EvaluateOptions {
    /// Evaluate only, do not approve or merge
    pub dry_run: bool,
    /// Explicit API token
    pub token: Option<String>,
}

/// Run the evaluate command
pub async fn run_evaluate(event_path: &Path, api_url: &str, options: EvaluateOptions) -> Result<()> {
    let ctx = CommandContext::new(event_path, options.token, api_url).await?;

    let evaluation = handle_check_suite(
        ctx.platform.as_ref(),
        &ctx.event,
        Accounts::default(),
        HandleOptions {
            dry_run: options.dry_run,
        },
    )
    .await?;

    match evaluation {
        Evaluation::Ignored(action) => {
            println!("{}", format!("Ignoring check_suite action {action:?}").muted());
        }
        Evaluation::Decided { decision, merge } => {
            if decision.is_allowed() {
                println!("{} {}", check(), decision);
            } else {
                println!("{} {}", cross(), decision.to_string().muted());
            }
            match merge {
                Some(MergeOutcome::Merged { sha }) => {
                    let sha = sha.as_deref().unwrap_or("(no sha)");
                    println!("{} Merged: {}", check(), sha.emphasis());
                }
                Some(MergeOutcome::Rejected { message }) => {
                    println!("{} Merge failed: {}", cross(), message.error());
                }
                None if decision.is_allowed() => {
                    println!("{}", "Dry run: not approving or merging".muted());
                }
                None => {}
            }
        }
    }

    Ok(())
}
