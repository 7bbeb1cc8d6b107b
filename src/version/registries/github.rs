//! GitHub Releases API registry implementation

use std::time::Duration;

use crate::config::{FETCH_TIMEOUT_SECS, MAX_PAGES, RELEASES_PER_PAGE};
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::types::{ReleaseField, ReleaseList, RepositorySlug};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Default base URL for GitHub API
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Response entry from GitHub Releases API
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: Option<String>,
    name: Option<String>,
}

impl Release {
    fn field(self, field: ReleaseField) -> Option<String> {
        match field {
            ReleaseField::TagName => self.tag_name,
            ReleaseField::Name => self.name,
        }
        .filter(|value| !value.is_empty())
    }
}

/// Registry implementation for GitHub Releases API
pub struct GitHubRegistry {
    client: reqwest::Client,
    base_url: String,
    field: ReleaseField,
}

impl GitHubRegistry {
    /// Creates a new GitHubRegistry with a custom base URL
    pub fn new(base_url: &str) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("release-version-filter/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            field: ReleaseField::default(),
        })
    }

    /// Report `field` of each release instead of the tag name
    pub fn with_field(mut self, field: ReleaseField) -> Self {
        self.field = field;
        self
    }

    async fn fetch_page(
        &self,
        repository: &RepositorySlug,
        page: usize,
    ) -> Result<Vec<Release>, RegistryError> {
        let url = format!(
            "{}/repos/{}/{}/releases?per_page={}&page={}",
            self.base_url, repository.owner, repository.repo, RELEASES_PER_PAGE, page
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(repository.to_string()));
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub releases response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })
    }
}

#[async_trait::async_trait]
impl Registry for GitHubRegistry {
    async fn fetch_releases(
        &self,
        repository: &RepositorySlug,
    ) -> Result<ReleaseList, RegistryError> {
        let mut versions = Vec::new();

        for page in 1..=MAX_PAGES {
            let releases = self.fetch_page(repository, page).await?;
            let count = releases.len();
            debug!("Fetched page {} of {} ({} releases)", page, repository, count);

            versions.extend(releases.into_iter().filter_map(|r| r.field(self.field)));

            if count < RELEASES_PER_PAGE {
                break;
            }
            if page == MAX_PAGES {
                warn!(
                    "Stopped listing {} after {} pages; remaining releases are omitted",
                    repository, MAX_PAGES
                );
            }
        }

        info!("Fetched {} releases for {}", versions.len(), repository);

        Ok(ReleaseList::new(versions))
    }
}
