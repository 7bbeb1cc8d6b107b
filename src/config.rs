use serde::Deserialize;
use std::path::PathBuf;

use crate::version::criterion::Criterion;
use crate::version::error::FilterError;
use crate::version::filter::{FilterOutcome, Options, filter_with_diagnostics};

// =============================================================================
// Fetch-related constants
// =============================================================================

/// Timeout for each release page request in seconds
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Releases requested per page from the GitHub API (its maximum)
pub const RELEASES_PER_PAGE: usize = 100;

/// Upper bound on pages fetched for a single repository
pub const MAX_PAGES: usize = 100;

/// Filter invocation options as supplied by a templating or scripting caller
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    #[serde(rename = "_criteria")]
    pub criteria: Option<String>,
    #[serde(rename = "_key")]
    pub key: Option<String>,
    pub include_decorated_versions: bool,
    pub normalize: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            criteria: None,
            key: None,
            include_decorated_versions: false,
            normalize: true,
        }
    }
}

impl FilterConfig {
    /// Validate into a typed criterion and options.
    pub fn resolve(&self) -> Result<(Criterion, Options), FilterError> {
        let criterion =
            Criterion::from_parts(self.criteria.as_deref().unwrap_or(""), self.key.as_deref())?;

        Ok((
            criterion,
            Options {
                include_decorated: self.include_decorated_versions,
                normalize: self.normalize,
            },
        ))
    }
}

/// Validate `config` and filter `input` with it.
pub fn apply<S: AsRef<str>>(
    input: &[S],
    config: &FilterConfig,
) -> Result<FilterOutcome, FilterError> {
    let (criterion, options) = config.resolve()?;
    Ok(filter_with_diagnostics(input, &criterion, options))
}

/// Returns the path to the data directory for release-version-filter.
/// Uses $XDG_DATA_HOME/release-version-filter if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/release-version-filter,
/// or ./release-version-filter if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("release-version-filter.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("release-version-filter")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::criterion::PartialVersion;
    use serde_json::json;

    #[test]
    fn filter_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<FilterConfig>(json!({
            "_criteria": "latest"
        }))
        .unwrap();

        assert_eq!(
            result,
            FilterConfig {
                criteria: Some("latest".to_string()),
                ..FilterConfig::default()
            }
        );
        assert!(!result.include_decorated_versions);
        assert!(result.normalize);
    }

    #[test]
    fn filter_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<FilterConfig>(json!({
            "_criteria": "gte",
            "_key": "4.2.2",
            "include_decorated_versions": true,
            "normalize": false
        }))
        .unwrap();

        let (criterion, options) = result.resolve().unwrap();

        assert_eq!(
            criterion,
            Criterion::GreaterOrEqual("4.2.2".parse::<PartialVersion>().unwrap())
        );
        assert_eq!(
            options,
            Options {
                include_decorated: true,
                normalize: false,
            }
        );
    }

    #[test]
    fn resolve_without_criteria_is_invalid() {
        let result = FilterConfig::default().resolve();

        assert_eq!(result, Err(FilterError::InvalidCriterion(String::new())));
    }

    #[test]
    fn resolve_reports_missing_key() {
        let config = FilterConfig {
            criteria: Some("eq".to_string()),
            ..FilterConfig::default()
        };

        assert_eq!(
            config.resolve(),
            Err(FilterError::MissingKey {
                criterion: "eq".to_string()
            })
        );
    }

    #[test]
    fn apply_filters_with_resolved_config() {
        let config = FilterConfig {
            criteria: Some("eq".to_string()),
            key: Some("4.2".to_string()),
            ..FilterConfig::default()
        };

        let outcome = apply(&["v4.2.0", "v4.3.0", "v4.2.2"], &config).unwrap();

        assert_eq!(outcome.versions, vec!["4.2.0", "4.2.2"]);
    }

    #[test]
    fn apply_fails_before_filtering_on_malformed_key() {
        let config = FilterConfig {
            criteria: Some("lte".to_string()),
            key: Some("v1.x".to_string()),
            ..FilterConfig::default()
        };

        assert!(matches!(
            apply(&["v1.0.0"], &config),
            Err(FilterError::MalformedKey { .. })
        ));
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/release-version-filter"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(
            path,
            PathBuf::from("/home/user/.local/share/release-version-filter")
        );
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./release-version-filter"));
    }
}
