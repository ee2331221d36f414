//! Wildcard version patterns such as `1.*.*-rc.*`
//!
//! A pattern mirrors a [`Version`] but each release digit and each
//! identifier may be replaced by the `*` wildcard. The set of versions a
//! pattern matches is called a stream.

use crate::domain::release::{parse_digit, split_release, Digit};
use crate::domain::version::split_spans;
use crate::domain::{Identifier, Release, Version};
use crate::error::{Result, SmgrError};
use std::fmt;
use std::str::FromStr;

pub const WILDCARD: &str = "*";

/// One pattern position: either `*` or a concrete value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment<T> {
    Wildcard,
    Literal(T),
}

impl<T: PartialEq> Segment<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Segment::Wildcard => true,
            Segment::Literal(literal) => literal == value,
        }
    }

    pub fn literal(&self) -> Option<&T> {
        match self {
            Segment::Wildcard => None,
            Segment::Literal(literal) => Some(literal),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard)
    }
}

impl<T: fmt::Display> fmt::Display for Segment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Wildcard => f.write_str(WILDCARD),
            Segment::Literal(literal) => write!(f, "{}", literal),
        }
    }
}

/// Release part of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReleasePattern {
    pub major: Segment<u64>,
    pub minor: Segment<u64>,
    pub patch: Segment<u64>,
}

impl ReleasePattern {
    pub fn matches(&self, release: &Release) -> bool {
        self.major.matches(&release.major)
            && self.minor.matches(&release.minor)
            && self.patch.matches(&release.patch)
    }

    /// Fill wildcard digits from `source`, keep literal digits
    pub fn project(&self, source: &Release) -> Release {
        let pick = |segment: &Segment<u64>, value: u64| segment.literal().copied().unwrap_or(value);
        Release::new(
            pick(&self.major, source.major),
            pick(&self.minor, source.minor),
            pick(&self.patch, source.patch),
        )
    }
}

/// A parsed version pattern
///
/// `VersionPattern::default()` is the empty pattern: it has no release,
/// prerelease or build component, matches nothing and is rejected by
/// stream operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VersionPattern {
    release: Option<ReleasePattern>,
    prerelease: Vec<Segment<Identifier>>,
    build: Vec<Segment<Identifier>>,
}

impl VersionPattern {
    /// Parse a pattern string using the same grammar as a version, where
    /// any single token may be `*`
    pub fn parse(raw: &str) -> Result<Self> {
        let spans = split_spans(raw);

        let (major, minor, patch) = split_release(spans.release);
        let release = ReleasePattern {
            major: digit_segment(major, Digit::Major)?,
            minor: digit_segment(minor, Digit::Minor)?,
            patch: digit_segment(patch, Digit::Patch)?,
        };

        let prerelease = match spans.prerelease {
            Some(pre) => pre
                .split('.')
                .map(|token| identifier_segment(token, Identifier::prerelease))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        let build = match spans.build {
            Some(build) => build
                .split('.')
                .map(|token| identifier_segment(token, Identifier::build))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(VersionPattern {
            release: Some(release),
            prerelease,
            build,
        })
    }

    pub fn release(&self) -> Option<&ReleasePattern> {
        self.release.as_ref()
    }

    pub fn prerelease(&self) -> &[Segment<Identifier>] {
        &self.prerelease
    }

    pub fn build(&self) -> &[Segment<Identifier>] {
        &self.build
    }

    pub fn is_empty(&self) -> bool {
        self.release.is_none() && self.prerelease.is_empty() && self.build.is_empty()
    }

    /// True for a non-empty pattern without any prerelease component
    pub fn is_release_only(&self) -> bool {
        !self.is_empty() && self.prerelease.is_empty()
    }

    /// Check whether `version` belongs to the stream this pattern denotes
    ///
    /// A pattern without prerelease identifiers only matches release
    /// versions. Build metadata is only checked when the pattern has some.
    pub fn matches(&self, version: &Version) -> bool {
        let Some(release) = &self.release else {
            return false;
        };
        if !release.matches(version.release()) {
            return false;
        }
        if !segments_match(&self.prerelease, version.prerelease()) {
            return false;
        }
        self.build.is_empty() || segments_match(&self.build, version.build())
    }

    /// The lowest concrete version the pattern can denote
    ///
    /// Every wildcard digit and identifier becomes `0`.
    pub fn first_version(&self) -> Version {
        let release = self
            .release
            .map(|r| r.project(&Release::default()))
            .unwrap_or_default();

        Version::new(release)
            .with_prerelease(first_identifiers(&self.prerelease))
            .with_build(first_identifiers(&self.build))
    }
}

impl FromStr for VersionPattern {
    type Err = SmgrError;

    fn from_str(s: &str) -> Result<Self> {
        VersionPattern::parse(s)
    }
}

impl fmt::Display for VersionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(release) = &self.release {
            write!(f, "{}.{}.{}", release.major, release.minor, release.patch)?;
        }
        for (i, segment) in self.prerelease.iter().enumerate() {
            write!(f, "{}{}", if i == 0 { '-' } else { '.' }, segment)?;
        }
        for (i, segment) in self.build.iter().enumerate() {
            write!(f, "{}{}", if i == 0 { '+' } else { '.' }, segment)?;
        }
        Ok(())
    }
}

fn digit_segment(token: &str, digit: Digit) -> Result<Segment<u64>> {
    if token == WILDCARD {
        return Ok(Segment::Wildcard);
    }
    parse_digit(token, digit).map(Segment::Literal)
}

fn identifier_segment(
    token: &str,
    parse: fn(&str) -> Result<Identifier>,
) -> Result<Segment<Identifier>> {
    if token == WILDCARD {
        return Ok(Segment::Wildcard);
    }
    parse(token).map(Segment::Literal)
}

fn segments_match(segments: &[Segment<Identifier>], ids: &[Identifier]) -> bool {
    segments.len() == ids.len() && segments.iter().zip(ids).all(|(s, id)| s.matches(id))
}

fn first_identifiers(segments: &[Segment<Identifier>]) -> Vec<Identifier> {
    segments
        .iter()
        .map(|segment| segment.literal().cloned().unwrap_or_else(Identifier::zero))
        .collect()
}
