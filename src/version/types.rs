//! Common types shared between registries and the filter

use std::fmt;
use std::str::FromStr;

use crate::version::error::{FilterError, RegistryError};

/// Release names as returned by a registry, in registry order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseList {
    pub versions: Vec<String>,
}

impl ReleaseList {
    pub fn new(versions: Vec<String>) -> Self {
        Self { versions }
    }

    /// Parse a JSON array of strings.
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        serde_json::from_str::<Vec<String>>(json)
            .map(Self::new)
            .map_err(|e| FilterError::InvalidInput(format!("expected a list of strings: {}", e)))
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }
}

impl From<Vec<String>> for ReleaseList {
    fn from(versions: Vec<String>) -> Self {
        Self::new(versions)
    }
}

/// A hosted repository in `OWNER/REPO` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    pub owner: String,
    pub repo: String,
}

impl FromStr for RepositorySlug {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(RegistryError::InvalidRepository(s.to_string())),
        }
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Which release attribute is reported as the version string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReleaseField {
    #[default]
    TagName,
    Name,
}
