//! Registry trait for fetching release lists from hosted repositories

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::{ReleaseList, RepositorySlug};

/// Trait for fetching the releases of a repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches every release of a repository
    ///
    /// # Arguments
    /// * `repository` - The repository to list (e.g., "kubevirt/kubevirt")
    ///
    /// # Returns
    /// * `Ok(ReleaseList)` - Release names in the order the registry returned them
    /// * `Err(RegistryError)` - If the fetch fails
    async fn fetch_releases(&self, repository: &RepositorySlug)
    -> Result<ReleaseList, RegistryError>;
}
