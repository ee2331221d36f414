use crate::domain::Increment;
use crate::error::{DigitError, Result, SmgrError};
use std::fmt;

/// The `major.minor.patch` triplet of a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Release {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Which release digit is being parsed, so errors name the right field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Digit {
    Major,
    Minor,
    Patch,
}

impl Digit {
    pub(crate) fn error(self, raw: &str, reason: DigitError) -> SmgrError {
        let raw = raw.to_string();
        match self {
            Digit::Major => SmgrError::InvalidMajor { raw, reason },
            Digit::Minor => SmgrError::InvalidMinor { raw, reason },
            Digit::Patch => SmgrError::InvalidPatch { raw, reason },
        }
    }
}

impl Release {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Release {
            major,
            minor,
            patch,
        }
    }

    /// Parse the release part of a version (e.g. "1.2.3")
    ///
    /// The text is split into at most three parts, so trailing dots end up
    /// in the patch and are reported as an invalid patch.
    pub fn parse(raw: &str) -> Result<Self> {
        let (major, minor, patch) = split_release(raw);

        Ok(Release {
            major: parse_digit(major, Digit::Major)?,
            minor: parse_digit(minor, Digit::Minor)?,
            patch: parse_digit(patch, Digit::Patch)?,
        })
    }

    /// Increment one digit and reset the lower ones
    ///
    /// - **Major**: `(major + 1, 0, 0)`
    /// - **Minor**: `(major, minor + 1, 0)`
    /// - **Patch**: `(major, minor, patch + 1)`
    /// - **None**: unchanged
    ///
    /// Digits saturate at `u64::MAX` instead of wrapping, so a saturated
    /// major or minor increment still resets the lower digits and can yield
    /// a lower release than `self`. Callers that need a strictly higher
    /// release check the result with `is_higher_than`.
    pub fn increment(&self, kind: Increment) -> Self {
        match kind {
            Increment::Major => Release::new(self.major.saturating_add(1), 0, 0),
            Increment::Minor => Release::new(self.major, self.minor.saturating_add(1), 0),
            Increment::Patch => {
                Release::new(self.major, self.minor, self.patch.saturating_add(1))
            }
            Increment::None => *self,
        }
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Split a release into its three dot-separated parts, missing parts empty
pub(crate) fn split_release(raw: &str) -> (&str, &str, &str) {
    let mut parts = raw.splitn(3, '.');
    let major = parts.next().unwrap_or("");
    let minor = parts.next().unwrap_or("");
    let patch = parts.next().unwrap_or("");
    (major, minor, patch)
}

pub(crate) fn parse_digit(raw: &str, digit: Digit) -> Result<u64> {
    if raw.is_empty() {
        return Err(digit.error(raw, DigitError::Empty));
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(digit.error(raw, DigitError::NonDigit));
    }
    if raw.len() > 1 && raw.starts_with('0') {
        return Err(digit.error(raw, DigitError::LeadingZero));
    }
    raw.parse::<u64>()
        .map_err(|_| digit.error(raw, DigitError::Overflow))
}
