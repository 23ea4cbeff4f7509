//! Shared command context for CLI commands
//!
//! Reads the delivery and builds the platform service for its repository.

use dependabot_steward::auth::get_github_auth;
use dependabot_steward::error::{Error, Result};
use dependabot_steward::event::CheckSuiteEvent;
use dependabot_steward::platform::{GitHubService, PlatformService};
use dependabot_steward::types::PlatformConfig;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Everything a command needs to evaluate one delivery
pub struct CommandContext {
    /// The parsed `check_suite` delivery
    pub event: CheckSuiteEvent,
    /// Platform service bound to the delivery's repository
    pub platform: Box<dyn PlatformService>,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// `event_path` of `-` reads the delivery from stdin.
    pub async fn new(event_path: &Path, token: Option<String>, api_url: &str) -> Result<Self> {
        let body = read_event(event_path)?;
        let event = CheckSuiteEvent::from_json(&body)?;

        let auth = get_github_auth(token).await?;
        debug!(source = ?auth.source, "resolved GitHub credentials");

        let config = PlatformConfig {
            owner: event.repository.owner.login.clone(),
            repo: event.repository.name.clone(),
            api_url: api_url.to_string(),
        };
        let platform = GitHubService::new(&auth.token, config)?;

        Ok(Self {
            event,
            platform: Box::new(platform),
        })
    }
}

fn read_event(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .map_err(|e| Error::Payload(format!("failed to read stdin: {e}")))?;
        return Ok(body);
    }
    std::fs::read_to_string(path)
        .map_err(|e| Error::Payload(format!("failed to read {}: {e}", path.display())))
}
