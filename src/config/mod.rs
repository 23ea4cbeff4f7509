//! Per-repository policy override (`.steward.yml`)
//!
//! The file is read from the pull request's head branch. A missing file is
//! the default configuration; an unusable one vetoes the merge and earns the
//! pull request a single advisory comment.

mod schema;

pub use schema::{EcosystemConfig, Enablement, StewardConfig};

use crate::accounts::Accounts;
use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::RepoContent;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, error, info};

/// Location of the configuration file in the repository
pub const CONFIG_PATH: &str = ".steward.yml";

/// Why a present `.steward.yml` cannot be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
    /// The path exists but is a directory, symlink or submodule
    NotAFile,
    /// The file is not valid base64/UTF-8/YAML or does not match the schema
    SchemaError(String),
}

impl ConfigProblem {
    /// Comment posted on the pull request
    pub const fn advisory_comment(&self) -> &'static str {
        match self {
            Self::NotAFile => "Configuration invalid: `.steward.yml` must be a file.",
            Self::SchemaError(_) => "Configuration invalid. Please check `.steward.yml`.",
        }
    }
}

impl std::fmt::Display for ConfigProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAFile => write!(f, "{CONFIG_PATH} is not a file"),
            Self::SchemaError(detail) => write!(f, "{CONFIG_PATH} is invalid: {detail}"),
        }
    }
}

/// Outcome of looking up `.steward.yml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigResolution {
    /// File present and valid
    Resolved(StewardConfig),
    /// No file; behaves like an empty configuration
    Absent,
    /// File present but unusable
    Invalid(ConfigProblem),
}

/// Decode the contents API payload into a configuration
pub fn parse_encoded(encoded: &str) -> std::result::Result<StewardConfig, ConfigProblem> {
    // The API wraps base64 at 60 columns
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| ConfigProblem::SchemaError(format!("content is not base64: {e}")))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| ConfigProblem::SchemaError(format!("content is not UTF-8: {e}")))?;
    StewardConfig::from_yaml(&text).map_err(ConfigProblem::SchemaError)
}

/// Fetches and validates `.steward.yml` for a pull request
pub struct ConfigResolver<'a> {
    platform: &'a dyn PlatformService,
    accounts: Accounts,
}

impl<'a> ConfigResolver<'a> {
    /// Create a resolver
    pub const fn new(platform: &'a dyn PlatformService, accounts: Accounts) -> Self {
        Self { platform, accounts }
    }

    /// Look up the configuration on `head_ref`
    ///
    /// Any fetch failure other than "not found" is returned as an error.
    /// When the file is invalid, an advisory comment is posted on the pull
    /// request unless steward has already commented there.
    pub async fn resolve(&self, pr_number: u64, head_ref: &str) -> Result<ConfigResolution> {
        let resolution = match self.platform.get_content(CONFIG_PATH, head_ref).await? {
            RepoContent::Missing => ConfigResolution::Absent,
            RepoContent::NotAFile => ConfigResolution::Invalid(ConfigProblem::NotAFile),
            RepoContent::File { encoded } => match parse_encoded(&encoded) {
                Ok(config) => ConfigResolution::Resolved(config),
                Err(problem) => ConfigResolution::Invalid(problem),
            },
        };

        match &resolution {
            ConfigResolution::Absent => debug!(pr_number, head_ref, "no {CONFIG_PATH}"),
            ConfigResolution::Resolved(config) => {
                debug!(pr_number, head_ref, ?config, "loaded {CONFIG_PATH}");
            }
            ConfigResolution::Invalid(problem) => {
                info!(pr_number, head_ref, %problem, "configuration invalid");
                self.post_advisory(pr_number, problem).await;
            }
        }

        Ok(resolution)
    }

    /// Best effort: failures are logged and swallowed
    async fn post_advisory(&self, pr_number: u64, problem: &ConfigProblem) {
        let comments = match self.platform.list_pr_comments(pr_number).await {
            Ok(comments) => comments,
            Err(e) => {
                error!(pr_number, error = %e, "failed to list comments, skipping advisory comment");
                return;
            }
        };

        if comments
            .iter()
            .any(|c| c.author_id == Some(self.accounts.steward_id))
        {
            debug!(pr_number, "already commented, skipping advisory comment");
            return;
        }

        if let Err(e) = self
            .platform
            .create_pr_comment(pr_number, problem.advisory_comment())
            .await
        {
            error!(pr_number, error = %e, "failed to post advisory comment");
        }
    }
}
