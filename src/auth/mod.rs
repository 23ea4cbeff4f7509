//! Authentication for GitHub
//!
//! Supports an explicit token (flag or `GITHUB_TOKEN`) and the `gh` CLI.

use crate::error::{Error, Result};
use tokio::process::Command;
use tracing::debug;

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from CLI tool (gh)
    Cli,
    /// Token from flag or environment variable
    EnvVar,
}

/// Resolved GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// API token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

/// Pick the explicit token if there is one, otherwise ask `gh auth token`
pub async fn get_github_auth(explicit: Option<String>) -> Result<GitHubAuthConfig> {
    if let Some(token) = explicit.filter(|t| !t.trim().is_empty()) {
        debug!("using GitHub token from flag/environment");
        return Ok(GitHubAuthConfig {
            token: token.trim().to_string(),
            source: AuthSource::EnvVar,
        });
    }

    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .map_err(|e| Error::Config(format!("no GITHUB_TOKEN set and gh is unavailable: {e}")))?;
    if !output.status.success() {
        return Err(Error::Config(
            "no GITHUB_TOKEN set and `gh auth token` failed".to_string(),
        ));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(Error::Config("`gh auth token` returned no token".to_string()));
    }
    debug!("using GitHub token from gh CLI");
    Ok(GitHubAuthConfig {
        token,
        source: AuthSource::Cli,
    })
}
