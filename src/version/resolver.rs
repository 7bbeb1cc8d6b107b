//! Release resolution: fetch a repository's releases and filter them

use std::sync::Arc;

use tracing::debug;

use crate::version::criterion::Criterion;
use crate::version::error::RegistryError;
use crate::version::filter::{FilterOutcome, Options, filter_with_diagnostics};
use crate::version::registry::Registry;
use crate::version::types::RepositorySlug;

/// Couples a registry with the filter so callers can go from a repository
/// name straight to the matching versions.
pub struct ReleaseResolver {
    registry: Arc<dyn Registry>,
}

impl ReleaseResolver {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }

    /// Fetch the releases of `repository` and select those matching `criterion`.
    pub async fn resolve(
        &self,
        repository: &RepositorySlug,
        criterion: &Criterion,
        options: Options,
    ) -> Result<FilterOutcome, RegistryError> {
        let releases = self.registry.fetch_releases(repository).await?;
        debug!(
            "Resolving '{}' against {} releases of {}",
            criterion,
            releases.len(),
            repository
        );

        Ok(filter_with_diagnostics(&releases.versions, criterion, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::registry::MockRegistry;
    use crate::version::types::ReleaseList;

    fn releases() -> ReleaseList {
        ReleaseList::new(
            ["v0.59.0", "v0.60.0-alpha.0", "v0.58.1", "v0.59.2", "nightly"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }

    #[tokio::test]
    async fn resolve_filters_fetched_releases() {
        let mut registry = MockRegistry::new();
        registry
            .expect_fetch_releases()
            .withf(|repo| repo.to_string() == "kubevirt/kubevirt")
            .times(1)
            .returning(|_| Ok(releases()));

        let resolver = ReleaseResolver::new(Arc::new(registry));
        let outcome = resolver
            .resolve(
                &"kubevirt/kubevirt".parse().unwrap(),
                &Criterion::from_parts("gte", Some("0.59")).unwrap(),
                Options::default(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.versions, vec!["0.59.0", "0.59.2"]);
        assert_eq!(outcome.skipped.len(), 2);
    }

    #[tokio::test]
    async fn resolve_latest_with_decorated_versions() {
        let mut registry = MockRegistry::new();
        registry
            .expect_fetch_releases()
            .returning(|_| Ok(releases()));

        let resolver = ReleaseResolver::new(Arc::new(registry));
        let outcome = resolver
            .resolve(
                &"kubevirt/kubevirt".parse().unwrap(),
                &Criterion::Latest,
                Options {
                    include_decorated: true,
                    normalize: false,
                },
            )
            .await
            .unwrap();

        assert_eq!(outcome.versions, vec!["v0.60.0-alpha.0"]);
    }

    #[tokio::test]
    async fn resolve_propagates_registry_errors() {
        let mut registry = MockRegistry::new();
        registry
            .expect_fetch_releases()
            .returning(|repo| Err(RegistryError::NotFound(repo.to_string())));

        let resolver = ReleaseResolver::new(Arc::new(registry));
        let result = resolver
            .resolve(
                &"missing/repo".parse().unwrap(),
                &Criterion::Latest,
                Options::default(),
            )
            .await;

        assert!(matches!(result, Err(RegistryError::NotFound(name)) if name == "missing/repo"));
    }
}
