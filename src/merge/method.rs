//! Merge method selection from repository settings

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{MergeMethod, RepositoryMergeCapability};

/// First allowed method in priority order merge, squash, rebase
pub const fn select_merge_method(capability: &RepositoryMergeCapability) -> Option<MergeMethod> {
    if capability.allow_merge_commit {
        Some(MergeMethod::Merge)
    } else if capability.allow_squash_merge {
        Some(MergeMethod::Squash)
    } else if capability.allow_rebase_merge {
        Some(MergeMethod::Rebase)
    } else {
        None
    }
}

/// Read the repository settings and pick the merge method
///
/// A repository that allows no method at all is a configuration error.
pub async fn resolve_merge_method(platform: &dyn PlatformService) -> Result<MergeMethod> {
    let capability = platform.get_merge_capability().await?;
    select_merge_method(&capability).ok_or_else(|| {
        let config = platform.config();
        Error::NoMergeMethod {
            owner: config.owner.clone(),
            repo: config.repo.clone(),
        }
    })
}
