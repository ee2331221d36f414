use crate::domain::{Identifier, Increment, Release};
use crate::error::{Result, SmgrError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A Semantic Versioning 2.0.0 version
///
/// Equality is structural and includes build metadata. Precedence, which
/// ignores build metadata, is exposed through [`Version::precedence`] rather
/// than `Ord` so the two notions never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Version {
    release: Release,
    prerelease: Vec<Identifier>,
    build: Vec<Identifier>,
}

/// The raw release, prerelease and build spans of a version-like string
pub(crate) struct Spans<'a> {
    pub release: &'a str,
    pub prerelease: Option<&'a str>,
    pub build: Option<&'a str>,
}

/// Release is everything before the first `-` or `+`, prerelease follows
/// the first `-` up to the first `+`, build follows the first `+`.
pub(crate) fn split_spans(raw: &str) -> Spans<'_> {
    let (head, build) = match raw.split_once('+') {
        Some((head, build)) => (head, Some(build)),
        None => (raw, None),
    };
    let (release, prerelease) = match head.split_once('-') {
        Some((release, pre)) => (release, Some(pre)),
        None => (head, None),
    };
    Spans {
        release,
        prerelease,
        build,
    }
}

impl Version {
    /// A release version with no prerelease or build identifiers
    pub fn new(release: Release) -> Self {
        Version {
            release,
            prerelease: Vec::new(),
            build: Vec::new(),
        }
    }

    pub fn with_prerelease(mut self, prerelease: Vec<Identifier>) -> Self {
        self.prerelease = prerelease;
        self
    }

    pub fn with_build(mut self, build: Vec<Identifier>) -> Self {
        self.build = build;
        self
    }

    /// Parse a full SemVer string such as `1.2.3-rc.1+build.5`
    ///
    /// # Returns
    /// * `Ok(Version)` - The parsed version
    /// * `Err` - `InvalidMajor`/`InvalidMinor`/`InvalidPatch` or
    ///   `InvalidIdentifier` carrying the offending text
    pub fn parse(raw: &str) -> Result<Self> {
        let spans = split_spans(raw);

        let release = Release::parse(spans.release)?;
        let prerelease = match spans.prerelease {
            Some(pre) => pre
                .split('.')
                .map(Identifier::prerelease)
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        let build = match spans.build {
            Some(build) => build
                .split('.')
                .map(Identifier::build)
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(Version {
            release,
            prerelease,
            build,
        })
    }

    pub fn release(&self) -> &Release {
        &self.release
    }

    pub fn prerelease(&self) -> &[Identifier] {
        &self.prerelease
    }

    pub fn build(&self) -> &[Identifier] {
        &self.build
    }

    /// True when the version has no prerelease identifiers
    pub fn is_release(&self) -> bool {
        self.prerelease.is_empty()
    }

    /// Compare two versions by SemVer precedence
    ///
    /// Release digits are compared numerically, a release sorts above any
    /// prerelease of the same triplet, prerelease identifiers are compared
    /// position by position and a shorter equal prefix sorts lower. Build
    /// metadata is ignored.
    pub fn precedence(&self, other: &Version) -> Ordering {
        self.release.cmp(&other.release).then_with(|| {
            match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.prerelease.as_slice().cmp(other.prerelease.as_slice()),
            }
        })
    }

    pub fn is_higher_than(&self, other: &Version) -> bool {
        self.precedence(other) == Ordering::Greater
    }

    /// Increment the release and drop prerelease and build identifiers
    pub fn increment_release(&self, kind: Increment) -> Version {
        Version::new(self.release.increment(kind))
    }
}

impl FromStr for Version {
    type Err = SmgrError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.release)?;
        write_identifiers(f, '-', &self.prerelease)?;
        write_identifiers(f, '+', &self.build)
    }
}

fn write_identifiers(f: &mut fmt::Formatter<'_>, lead: char, ids: &[Identifier]) -> fmt::Result {
    for (i, id) in ids.iter().enumerate() {
        let sep = if i == 0 { lead } else { '.' };
        write!(f, "{}{}", sep, id)?;
    }
    Ok(())
}

/// Parse a list of versions from a single string
///
/// Accepts either a comma separated list (surrounding whitespace ignored)
/// or a whitespace separated one. An empty input yields an empty list.
pub fn parse_version_list(raw: &str) -> Result<Vec<Version>> {
    split_version_list(raw).map(Version::parse).collect()
}

fn split_version_list(raw: &str) -> Box<dyn Iterator<Item = &str> + '_> {
    let raw = raw.trim();
    if raw.contains(',') {
        Box::new(raw.split(',').map(str::trim).filter(|s| !s.is_empty()))
    } else {
        Box::new(raw.split_whitespace())
    }
}
