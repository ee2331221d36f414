use crate::domain::{Version, VersionPattern};
use crate::error::{Result, SmgrError};
use std::fmt;
use tracing::debug;

/// A selection step over a list of versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Keep versions that belong to the stream of a pattern
    Pattern(VersionPattern),
    /// Keep versions without prerelease identifiers
    ReleaseOnly,
    /// Reduce the list to its single highest-precedence version
    Highest,
}

impl Filter {
    /// Run this filter over `versions`
    ///
    /// # Returns
    /// * `Ok(Vec<Version>)` - The retained versions, in input order
    /// * `Err(EmptyVersionList)` - `Highest` received no versions
    pub fn apply(&self, versions: Vec<Version>) -> Result<Vec<Version>> {
        match self {
            Filter::Pattern(pattern) => Ok(versions
                .into_iter()
                .filter(|version| pattern.matches(version))
                .collect()),
            Filter::ReleaseOnly => Ok(versions
                .into_iter()
                .filter(Version::is_release)
                .collect()),
            Filter::Highest => Ok(vec![highest(&versions)?.clone()]),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Pattern(pattern) => write!(f, "stream {}", pattern),
            Filter::ReleaseOnly => write!(f, "release only"),
            Filter::Highest => write!(f, "highest"),
        }
    }
}

/// Thread `versions` through each filter in order
///
/// Stops at the first failing filter and returns its error.
pub fn apply_filters(versions: Vec<Version>, filters: &[Filter]) -> Result<Vec<Version>> {
    filters.iter().try_fold(versions, |remaining, filter| {
        let kept = filter.apply(remaining)?;
        debug!(%filter, kept = kept.len(), "applied filter");
        Ok(kept)
    })
}

/// The highest-precedence version of a list
///
/// Among versions of equal precedence (differing only in build metadata)
/// the first one wins.
pub fn highest(versions: &[Version]) -> Result<&Version> {
    versions
        .iter()
        .reduce(|best, version| {
            if version.is_higher_than(best) {
                version
            } else {
                best
            }
        })
        .ok_or(SmgrError::EmptyVersionList)
}

/// The current version of the stream denoted by `pattern`
///
/// # Returns
/// * `Ok(Version)` - Highest version matching `pattern`
/// * `Err(EmptyVersionList)` - No version matches; the stream is new
pub fn highest_on_stream(versions: &[Version], pattern: &VersionPattern) -> Result<Version> {
    let on_stream = Filter::Pattern(pattern.clone()).apply(versions.to_vec())?;
    apply_filters(on_stream, &[Filter::Highest])?
        .pop()
        .ok_or(SmgrError::EmptyVersionList)
}

/// Sort versions from highest to lowest precedence
///
/// The sort is stable, so versions differing only in build metadata keep
/// their relative order.
pub fn sort_descending(versions: &mut [Version]) {
    versions.sort_by(|a, b| b.precedence(a));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_version_list;

    fn vs(s: &str) -> Vec<Version> {
        parse_version_list(s).unwrap()
    }

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn p(s: &str) -> VersionPattern {
        VersionPattern::parse(s).unwrap()
    }

    #[test]
    fn test_pattern_then_highest() {
        let filters = [Filter::Pattern(p("1.2.*")), Filter::Highest];
        let result = apply_filters(vs("1.0.0 1.2.0 1.2.4 2.3.4"), &filters).unwrap();
        assert_eq!(result, vec![v("1.2.4")]);
    }

    #[test]
    fn test_pattern_filter_keeps_order() {
        let result = Filter::Pattern(p("1.*.*"))
            .apply(vs("1.1.0 2.0.0 1.0.0 1.0.0-rc.1"))
            .unwrap();
        assert_eq!(result, vs("1.1.0 1.0.0"));
    }

    #[test]
    fn test_pattern_filter_no_match_is_empty_not_error() {
        let result = Filter::Pattern(p("3.*.*")).apply(vs("1.0.0 2.0.0")).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_release_only() {
        let result = Filter::ReleaseOnly
            .apply(vs("1.0.0-rc.1 1.0.0 1.1.0-alpha 0.9.0+build"))
            .unwrap();
        assert_eq!(result, vs("1.0.0 0.9.0+build"));
    }

    #[test]
    fn test_highest_cases() {
        let cases = [
            ("0.0.0-1+054 0.1.0-1+054", "0.1.0-1+054"),
            ("1.0.0 0.0.0-2", "1.0.0"),
            ("0.1.0-alpha.2 0.1.0-alpha", "0.1.0-alpha.2"),
            ("0.1.0+100 0.1.0+200", "0.1.0+100"),
            ("1.0.0-rc.1 1.0.0 1.0.0-beta.11", "1.0.0"),
        ];
        for (input, expected) in cases {
            let result = Filter::Highest.apply(vs(input)).unwrap();
            assert_eq!(result, vec![v(expected)], "input: {}", input);
        }
    }

    #[test]
    fn test_highest_empty_fails() {
        assert!(matches!(
            Filter::Highest.apply(Vec::new()),
            Err(SmgrError::EmptyVersionList)
        ));
    }

    #[test]
    fn test_highest_is_idempotent() {
        let versions = vs("1.0.0 2.0.0-rc.1 1.9.9 2.0.0-rc.1+b");
        let once = Filter::Highest.apply(versions.clone()).unwrap();
        assert_eq!(Filter::Highest.apply(once.clone()).unwrap(), once);

        let mut folded = once.clone();
        folded.extend(versions);
        assert_eq!(Filter::Highest.apply(folded).unwrap(), once);
    }

    #[test]
    fn test_apply_filters_short_circuits() {
        let filters = [
            Filter::Pattern(p("9.*.*")),
            Filter::Highest,
            Filter::ReleaseOnly,
        ];
        assert!(matches!(
            apply_filters(vs("1.0.0"), &filters),
            Err(SmgrError::EmptyVersionList)
        ));
    }

    #[test]
    fn test_apply_no_filters_is_identity() {
        let versions = vs("2.0.0 1.0.0");
        assert_eq!(apply_filters(versions.clone(), &[]).unwrap(), versions);
    }

    #[test]
    fn test_highest_on_stream() {
        let versions = vs("1.0.0 2.0.0 1.1.0");
        assert_eq!(highest_on_stream(&versions, &p("1.*.*")).unwrap(), v("1.1.0"));

        let versions = vs("1.1.1-alpha 1.2.2-alpha 1.3.3");
        assert_eq!(
            highest_on_stream(&versions, &p("1.*.*-alpha")).unwrap(),
            v("1.2.2-alpha")
        );
    }

    #[test]
    fn test_highest_on_stream_new_stream() {
        let err = highest_on_stream(&vs("1.0.0 2.0.0"), &p("3.*.*")).unwrap_err();
        assert!(err.is_empty_version_list());
        assert!(highest_on_stream(&[], &p("1.*.*")).unwrap_err().is_empty_version_list());
    }

    #[test]
    fn test_sort_descending() {
        let mut versions = vs("1.0.0-rc.1 0.1.0 1.0.0 1.0.0-alpha 2.0.0");
        sort_descending(&mut versions);
        assert_eq!(versions, vs("2.0.0 1.0.0 1.0.0-rc.1 1.0.0-alpha 0.1.0"));
    }
}
