//! Selection of versions from a release list
//!
//! Entries that cannot be read as versions, and decorated versions unless
//! requested, are dropped before matching. Survivors keep their input order.

use tracing::debug;

use crate::version::criterion::Criterion;
use crate::version::parsed::{ParseVersionError, ParsedVersion};

/// Per-call filter options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Keep versions carrying a `-decorator` suffix (default: false)
    pub include_decorated: bool,
    /// Render matches as `major.minor.patch` (default: true)
    pub normalize: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            include_decorated: false,
            normalize: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Unparseable(ParseVersionError),
    Decorated,
}

/// An input entry excluded before matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub input: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub versions: Vec<String>,
    pub skipped: Vec<SkippedEntry>,
}

/// Select the versions in `input` matching `criterion`.
pub fn filter<S: AsRef<str>>(input: &[S], criterion: &Criterion, options: Options) -> Vec<String> {
    filter_with_diagnostics(input, criterion, options).versions
}

/// Same as [`filter`], also reporting which entries were skipped and why.
pub fn filter_with_diagnostics<S: AsRef<str>>(
    input: &[S],
    criterion: &Criterion,
    options: Options,
) -> FilterOutcome {
    let mut skipped = Vec::new();
    let mut candidates = Vec::with_capacity(input.len());

    for tag in input {
        let tag = tag.as_ref();
        match ParsedVersion::parse(tag) {
            Ok(parsed) if parsed.is_decorated() && !options.include_decorated => {
                skipped.push(SkippedEntry {
                    input: tag.to_string(),
                    reason: SkipReason::Decorated,
                });
            }
            Ok(parsed) => candidates.push(parsed),
            Err(e) => {
                debug!("Skipping unparseable version '{}': {}", tag, e);
                skipped.push(SkippedEntry {
                    input: tag.to_string(),
                    reason: SkipReason::Unparseable(e),
                });
            }
        }
    }

    let selected: Vec<&ParsedVersion> = match criterion {
        Criterion::Latest => {
            let max = candidates.iter().map(ParsedVersion::precedence).max();
            candidates
                .iter()
                .filter(|v| max.as_ref() == Some(&v.precedence()))
                .collect()
        }
        keyed => candidates.iter().filter(|v| keyed.accepts(v)).collect(),
    };

    debug!(
        "Criterion '{}' selected {} of {} entries ({} skipped)",
        criterion,
        selected.len(),
        input.len(),
        skipped.len()
    );

    FilterOutcome {
        versions: selected
            .into_iter()
            .map(|v| v.render(options.normalize, options.include_decorated))
            .collect(),
        skipped,
    }
}
