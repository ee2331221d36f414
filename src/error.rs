use std::fmt;

use thiserror::Error;

/// Why a release digit (major, minor or patch) was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitError {
    Empty,
    NonDigit,
    LeadingZero,
    Overflow,
}

impl fmt::Display for DigitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigitError::Empty => write!(f, "MUST NOT be empty"),
            DigitError::NonDigit => write!(f, "MUST comprise only ASCII numerics [0-9]"),
            DigitError::LeadingZero => write!(f, "MUST NOT contain leading zeroes"),
            DigitError::Overflow => write!(f, "MUST fit in an unsigned 64-bit integer"),
        }
    }
}

/// Unified error type for semver-manager operations
#[derive(Error, Debug)]
pub enum SmgrError {
    #[error("invalid identifier '{raw}': {reason}")]
    InvalidIdentifier { raw: String, reason: &'static str },

    #[error("major version {reason}, got: '{raw}'")]
    InvalidMajor { raw: String, reason: DigitError },

    #[error("minor version {reason}, got: '{raw}'")]
    InvalidMinor { raw: String, reason: DigitError },

    #[error("patch version {reason}, got: '{raw}'")]
    InvalidPatch { raw: String, reason: DigitError },

    #[error("'{0}' cannot be incremented past the 64-bit range")]
    Overflow(String),

    #[error("version list is empty")]
    EmptyVersionList,

    #[error("stream pattern '{0}' must be release only")]
    PatternNotReleaseOnly(String),

    #[error("version pattern is empty")]
    EmptyPattern,

    #[error("identifier '{0}' is neither numeric nor a single letter and cannot be incremented")]
    UnsupportedIdentifierShape(String),

    #[error("version {version} already exists on stream '{stream}'")]
    PromotionCollision { version: String, stream: String },

    #[error("promoted version {version} falls outside stream '{stream}'")]
    PromotionOffStream { version: String, stream: String },

    #[error("invalid increment '{0}': expected one of major, minor, patch, none")]
    InvalidIncrement(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag source error: {0}")]
    Source(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semver-manager
pub type Result<T> = std::result::Result<T, SmgrError>;

impl SmgrError {
    pub fn config(msg: impl Into<String>) -> Self {
        SmgrError::Config(msg.into())
    }

    pub fn tag(msg: impl Into<String>) -> Self {
        SmgrError::Tag(msg.into())
    }

    pub fn tag_source(msg: impl Into<String>) -> Self {
        SmgrError::Source(msg.into())
    }

    /// True for the "nothing matched" signal that seeds a new stream
    pub fn is_empty_version_list(&self) -> bool {
        matches!(self, SmgrError::EmptyVersionList)
    }
}
