//! Error types for steward
//!
//! Policy vetoes are not errors. Anything that surfaces here aborts the
//! evaluation of the current delivery.

use thiserror::Error;

/// Fatal errors raised while evaluating or executing a merge
#[derive(Debug, Error)]
pub enum Error {
    /// Unexpected failure talking to the GitHub API
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// The repository allows none of the merge methods
    #[error("repository {owner}/{repo} allows no merge method (merge, squash or rebase)")]
    NoMergeMethod {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
    },

    /// A bot branch that embeds no known ecosystem identifier
    #[error("branch '{0}' does not name a known dependency ecosystem")]
    UnknownEcosystem(String),

    /// The webhook payload could not be parsed
    #[error("invalid check_suite payload: {0}")]
    Payload(String),

    /// Process configuration problem (missing token, bad API URL, ...)
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal invariant violation
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

/// Result type alias using steward's Error
pub type Result<T> = std::result::Result<T, Error>;
