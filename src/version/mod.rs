//! Version management layer for release filtering
//!
//! This module provides the functionality for fetching release lists and
//! selecting versions from them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│ ReleaseList │────▶│   Filter    │
//! │  (fetch)    │     │  (strings)  │     │  (select)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │ Registries  │                         │  Criterion  │
//! │  (github)   │                         │ (eq,gte,..) │
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`criterion`]: Match criteria and partial version keys
//! - [`filter`]: Selection and rendering of matching versions
//! - [`parsed`]: Parsing of raw version tags
//! - [`registry`]: Registry trait for fetching releases from remote sources
//! - [`registries`]: Concrete registry implementations (GitHub)
//! - [`resolver`]: Fetch-then-filter coordinator
//! - [`error`]: Error types for filtering and registry operations
//! - [`types`]: Common types like `ReleaseList` and `RepositorySlug`

pub mod criterion;
pub mod error;
pub mod filter;
pub mod parsed;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod types;
