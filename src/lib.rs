//! Fetch release lists from GitHub and filter version strings by criteria.
//!
//! # Modules
//!
//! - [`config`]: Invocation options and filesystem locations
//! - [`logging`]: Tracing subscriber setup for the binary
//! - [`version`]: Version parsing, filtering, and release registries

pub mod config;
pub mod logging;
pub mod version;
