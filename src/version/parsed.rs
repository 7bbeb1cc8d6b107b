//! Parsing of raw release tags into structured versions
//!
//! Accepted shape: an optional alphabetic prefix (`v`, `ver`), one to three
//! dot-separated numeric components, and an optional `-decorator`.
//!
//! - `v4.2.2` -> prefix, 4.2.2
//! - `1.0` -> 1.0 (patch unspecified)
//! - `v4.5.0-alpha1` -> prefix, 4.5.0, decorator `alpha1`

use std::sync::LazyLock;

use regex::Regex;
use semver::Version;
use thiserror::Error;

static VERSION_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<prefix>[A-Za-z]*)(?P<major>[0-9]+)(?:\.(?P<minor>[0-9]+)(?:\.(?P<patch>[0-9]+))?)?(?:-(?P<decorator>.+))?$",
    )
    .expect("version tag pattern is valid")
});

/// Reason a tag could not be read as a version
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseVersionError {
    #[error("no numeric major component")]
    NoMajor,

    #[error("does not match [prefix]MAJOR[.MINOR[.PATCH]][-DECORATOR]")]
    Malformed,

    #[error("component '{0}' does not fit in 64 bits")]
    Overflow(String),
}

/// A release tag split into its numeric components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVersion {
    pub has_prefix: bool,
    pub major: u64,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub decorator: Option<String>,
    pub original: String,
}

impl ParsedVersion {
    pub fn parse(tag: &str) -> Result<Self, ParseVersionError> {
        let caps = VERSION_TAG.captures(tag).ok_or_else(|| {
            if tag.bytes().any(|b| b.is_ascii_digit()) {
                ParseVersionError::Malformed
            } else {
                ParseVersionError::NoMajor
            }
        })?;

        let component = |name: &str| -> Result<Option<u64>, ParseVersionError> {
            caps.name(name)
                .map(|m| {
                    m.as_str()
                        .parse::<u64>()
                        .map_err(|_| ParseVersionError::Overflow(m.as_str().to_string()))
                })
                .transpose()
        };

        let major = component("major")?.ok_or(ParseVersionError::NoMajor)?;

        Ok(Self {
            has_prefix: caps.name("prefix").is_some_and(|m| !m.as_str().is_empty()),
            major,
            minor: component("minor")?,
            patch: component("patch")?,
            decorator: caps.name("decorator").map(|m| m.as_str().to_string()),
            original: tag.to_string(),
        })
    }

    pub fn is_decorated(&self) -> bool {
        self.decorator.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// `(major, minor, patch)` with unspecified components filled with 0
    pub fn triple(&self) -> [u64; 3] {
        [
            self.major,
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        ]
    }

    /// Ordering key; the decorator never takes part in ordering
    pub fn precedence(&self) -> Version {
        let [major, minor, patch] = self.triple();
        Version::new(major, minor, patch)
    }

    /// Render for output.
    ///
    /// With `normalize`, the prefix is dropped and missing components become 0;
    /// the decorator is kept only when decorated versions are included.
    pub fn render(&self, normalize: bool, include_decorated: bool) -> String {
        if !normalize {
            return self.original.clone();
        }

        let canonical = self.precedence().to_string();
        match self.decorator.as_deref() {
            Some(decorator) if include_decorated && !decorator.is_empty() => {
                format!("{canonical}-{decorator}")
            }
            _ => canonical,
        }
    }
}
