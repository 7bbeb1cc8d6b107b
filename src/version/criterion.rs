//! Match criteria and the partial version keys they compare against

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::version::error::FilterError;
use crate::version::parsed::ParsedVersion;

/// A key of 1 to 3 numeric components; missing components are wildcards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialVersion {
    components: Vec<u64>,
}

impl PartialVersion {
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Compare `version` against this key using only the components the key
    /// specifies.
    ///
    /// - key `4.2` vs `4.2.9` -> Equal
    /// - key `4.2` vs `4.3.0` -> Greater
    /// - key `4.2.2` vs `4.2.0` -> Less
    pub fn compare(&self, version: &ParsedVersion) -> Ordering {
        let triple = version.triple();
        triple
            .iter()
            .zip(&self.components)
            .map(|(have, want)| have.cmp(want))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl FromStr for PartialVersion {
    type Err = FilterError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| FilterError::MalformedKey {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() > 3 {
            return Err(malformed("expected at most 3 components"));
        }

        let components = parts
            .into_iter()
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(malformed("components must be non-negative integers"));
                }
                part.parse::<u64>()
                    .map_err(|_| malformed("component does not fit in 64 bits"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { components })
    }
}

impl fmt::Display for PartialVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.components.iter().map(u64::to_string).collect();
        write!(f, "{}", rendered.join("."))
    }
}

/// Selection mode for a filter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Latest,
    Equal(PartialVersion),
    GreaterOrEqual(PartialVersion),
    LessOrEqual(PartialVersion),
}

impl Criterion {
    /// Build a criterion from its keyword and optional key.
    ///
    /// A key given together with `latest` is ignored.
    pub fn from_parts(criteria: &str, key: Option<&str>) -> Result<Self, FilterError> {
        let required_key = || -> Result<PartialVersion, FilterError> {
            match key.map(str::trim) {
                Some(key) if !key.is_empty() => key.parse(),
                _ => Err(FilterError::MissingKey {
                    criterion: criteria.to_string(),
                }),
            }
        };

        match criteria {
            "latest" => {
                if let Some(key) = key {
                    debug!("Ignoring key '{}' for criterion 'latest'", key);
                }
                Ok(Self::Latest)
            }
            "eq" => Ok(Self::Equal(required_key()?)),
            "gte" => Ok(Self::GreaterOrEqual(required_key()?)),
            "lte" => Ok(Self::LessOrEqual(required_key()?)),
            other => Err(FilterError::InvalidCriterion(other.to_string())),
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Equal(_) => "eq",
            Self::GreaterOrEqual(_) => "gte",
            Self::LessOrEqual(_) => "lte",
        }
    }

    /// Whether `version` satisfies a keyed criterion. Always false for
    /// `Latest`, which depends on the whole candidate set and is resolved by
    /// the filter.
    pub(crate) fn accepts(&self, version: &ParsedVersion) -> bool {
        match self {
            Self::Latest => false,
            Self::Equal(key) => key.compare(version).is_eq(),
            Self::GreaterOrEqual(key) => key.compare(version).is_ge(),
            Self::LessOrEqual(key) => key.compare(version).is_le(),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Equal(key) | Self::GreaterOrEqual(key) | Self::LessOrEqual(key) => {
                write!(f, "{} {}", self.keyword(), key)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn key(s: &str) -> PartialVersion {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("4", vec![4])]
    #[case("4.2", vec![4, 2])]
    #[case("4.2.2", vec![4, 2, 2])]
    #[case("0.0.0", vec![0, 0, 0])]
    fn partial_version_parses_components(#[case] input: &str, #[case] expected: Vec<u64>) {
        assert_eq!(key(input).components(), expected.as_slice());
    }

    #[rstest]
    #[case("")]
    #[case("v1.2")]
    #[case("1.2.3.4")]
    #[case("1.2.3-rc")]
    #[case("1..2")]
    #[case("-1")]
    #[case("+1")]
    #[case("1.x")]
    #[case("99999999999999999999999")]
    fn partial_version_rejects_malformed_keys(#[case] input: &str) {
        assert!(matches!(
            input.parse::<PartialVersion>(),
            Err(FilterError::MalformedKey { .. })
        ));
    }

    #[rstest]
    #[case("4.2", "4.2.9", Ordering::Equal)]
    #[case("4.2", "4.3.0", Ordering::Greater)]
    #[case("4.2", "3.9.9", Ordering::Less)]
    #[case("4.2.2", "4.2.0", Ordering::Less)]
    #[case("1.0.0", "1.0", Ordering::Equal)]
    #[case("1", "v1.9-rc", Ordering::Equal)]
    fn compare_uses_only_specified_components(
        #[case] k: &str,
        #[case] version: &str,
        #[case] expected: Ordering,
    ) {
        let version = ParsedVersion::parse(version).unwrap();
        assert_eq!(key(k).compare(&version), expected);
    }

    #[rstest]
    #[case("latest", None, Criterion::Latest)]
    #[case("latest", Some("1.2"), Criterion::Latest)]
    #[case("eq", Some("4.2"), Criterion::Equal(key("4.2")))]
    #[case("gte", Some("4.2.2"), Criterion::GreaterOrEqual(key("4.2.2")))]
    #[case("lte", Some(" 1 "), Criterion::LessOrEqual(key("1")))]
    fn from_parts_builds_criterion(
        #[case] criteria: &str,
        #[case] k: Option<&str>,
        #[case] expected: Criterion,
    ) {
        assert_eq!(Criterion::from_parts(criteria, k).unwrap(), expected);
    }

    #[rstest]
    #[case("eq", None)]
    #[case("gte", Some(""))]
    #[case("lte", Some("   "))]
    fn from_parts_requires_key(#[case] criteria: &str, #[case] k: Option<&str>) {
        assert_eq!(
            Criterion::from_parts(criteria, k),
            Err(FilterError::MissingKey {
                criterion: criteria.to_string()
            })
        );
    }

    #[rstest]
    #[case("")]
    #[case("newest")]
    #[case("EQ")]
    #[case(">=")]
    fn from_parts_rejects_unknown_criterion(#[case] criteria: &str) {
        assert_eq!(
            Criterion::from_parts(criteria, Some("1")),
            Err(FilterError::InvalidCriterion(criteria.to_string()))
        );
    }

    #[rstest]
    #[case(Criterion::Latest, false)]
    #[case(Criterion::Equal(key("4.2")), true)]
    #[case(Criterion::GreaterOrEqual(key("4.3")), false)]
    #[case(Criterion::LessOrEqual(key("4.2.2")), true)]
    fn accepts_answers_only_keyed_criteria(#[case] criterion: Criterion, #[case] expected: bool) {
        let version = ParsedVersion::parse("v4.2.2").unwrap();

        assert_eq!(criterion.accepts(&version), expected);
    }

    #[test]
    fn display_shows_keyword_and_key() {
        assert_eq!(Criterion::GreaterOrEqual(key("4.2")).to_string(), "gte 4.2");
        assert_eq!(Criterion::Latest.to_string(), "latest");
    }
}
