//! Dot-separated identifiers used in prerelease and build-metadata segments
//!
//! Precedence and syntax follow SemVer 2.0.0 items 9 and 10 (https://semver.org)

use crate::error::{Result, SmgrError};
use std::cmp::Ordering;
use std::fmt;

/// A validated prerelease or build-metadata identifier
///
/// Only `[0-9A-Za-z-]` is accepted and the identifier is never empty.
/// Prerelease identifiers additionally reject numeric values with leading
/// zeroes, build identifiers do not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Parse an identifier found after the `-` of a version
    pub fn prerelease(raw: &str) -> Result<Self> {
        validate_charset(raw)?;
        if is_all_digits(raw) && raw.len() > 1 && raw.starts_with('0') {
            return Err(SmgrError::InvalidIdentifier {
                raw: raw.to_string(),
                reason: "numeric prerelease identifiers MUST NOT include leading zeroes",
            });
        }
        Ok(Identifier(raw.to_string()))
    }

    /// Parse an identifier found after the `+` of a version
    pub fn build(raw: &str) -> Result<Self> {
        validate_charset(raw)?;
        Ok(Identifier(raw.to_string()))
    }

    /// The `0` identifier used to seed new positions
    pub fn zero() -> Self {
        Identifier("0".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier is made of ASCII digits only
    pub fn is_numeric(&self) -> bool {
        is_all_digits(&self.0)
    }

    /// Advance the identifier by one step
    ///
    /// Numeric identifiers go through [`Identifier::numeric_increment`],
    /// everything else through [`Identifier::alphabetic_increment`].
    pub fn increment(&self) -> Result<Self> {
        if self.is_numeric() {
            self.numeric_increment()
        } else {
            self.alphabetic_increment()
        }
    }

    /// Add one to a numeric identifier (`"9"` -> `"10"`)
    ///
    /// # Returns
    /// * `Err(Overflow)` - If the result does not fit in 64 bits
    /// * `Err(InvalidIdentifier)` - If the value carries a leading zero
    /// * `Err(UnsupportedIdentifierShape)` - If the identifier is not numeric
    pub fn numeric_increment(&self) -> Result<Self> {
        if !self.is_numeric() {
            return Err(SmgrError::UnsupportedIdentifierShape(self.0.clone()));
        }
        if self.0.len() > 1 && self.0.starts_with('0') {
            return Err(SmgrError::InvalidIdentifier {
                raw: self.0.clone(),
                reason: "numeric identifiers MUST NOT include leading zeroes",
            });
        }

        let value = self
            .0
            .parse::<u64>()
            .map_err(|_| SmgrError::Overflow(self.0.clone()))?;
        let next = value
            .checked_add(1)
            .ok_or_else(|| SmgrError::Overflow(self.0.clone()))?;

        Ok(Identifier(next.to_string()))
    }

    /// Advance a single-letter identifier (`"a"` -> `"b"`)
    ///
    /// `z` and `Z` do not wrap around: a new trailing letter is appended
    /// instead (`"z"` -> `"za"`, `"Z"` -> `"ZA"`), which still sorts higher.
    pub fn alphabetic_increment(&self) -> Result<Self> {
        let mut chars = self.0.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => c,
            _ => return Err(SmgrError::UnsupportedIdentifierShape(self.0.clone())),
        };

        let next = match letter {
            'z' => "za".to_string(),
            'Z' => "ZA".to_string(),
            c => char::from(c as u8 + 1).to_string(),
        };
        Ok(Identifier(next))
    }
}

impl Ord for Identifier {
    /// SemVer precedence between two identifiers at the same position
    ///
    /// Numeric identifiers compare numerically and sort below alphanumeric
    /// ones; alphanumeric identifiers compare as ASCII strings.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_numeric(), other.is_numeric()) {
            (true, true) => compare_numeric(&self.0, &other.0),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.0.as_bytes().cmp(other.0.as_bytes()),
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn validate_charset(raw: &str) -> Result<()> {
    if raw.is_empty() {
        return Err(SmgrError::InvalidIdentifier {
            raw: raw.to_string(),
            reason: "identifiers MUST NOT be empty",
        });
    }
    if !raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(SmgrError::InvalidIdentifier {
            raw: raw.to_string(),
            reason: "identifiers MUST comprise only ASCII alphanumerics and hyphens [0-9A-Za-z-]",
        });
    }
    Ok(())
}

fn is_all_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

// Arbitrary-length numeric comparison; build identifiers may carry leading
// zeroes, so those are stripped first and the raw text breaks ties.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
        .then_with(|| a.cmp(b))
}
