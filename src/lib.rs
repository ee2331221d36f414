//! Parse, filter, increment and promote Semantic Versioning 2.0.0 versions.
//!
//! - [`domain`] holds the value types: [`Version`], [`VersionPattern`] and
//!   their parts.
//! - [`engine`] selects versions from a list and computes new ones.
//! - [`source`] lists raw tags from repository and registry hosts.

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod source;
pub mod ui;

pub use domain::{Identifier, Increment, Release, TagFormat, Version, VersionPattern};
pub use error::{Result, SmgrError};
