//! Command workflows behind the `smgr` subcommands
//!
//! Each workflow takes plain option structs rather than clap types, so it
//! can be called programmatically and tested without spawning the binary.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::{parse_version_list, Increment, Version, VersionPattern};
use crate::engine::{
    apply_filters, increment_kind_between, increment_release, increment_release_from_stream,
    promote_prerelease, sort_descending, Filter,
};
use crate::source::{fetch_versions, TagSource};

/// Which filters to run over a version list, in the order they apply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Keep versions on this stream
    pub stream: Option<VersionPattern>,
    /// Keep release versions only
    pub release: bool,
    /// Keep only the highest version
    pub highest: bool,
}

impl FilterOptions {
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if let Some(stream) = &self.stream {
            filters.push(Filter::Pattern(stream.clone()));
        }
        if self.release {
            filters.push(Filter::ReleaseOnly);
        }
        if self.highest {
            filters.push(Filter::Highest);
        }
        filters
    }
}

/// Where existing versions come from for a workflow
///
/// `versions` is a raw list as typed on the command line. When `fetch` is
/// set, the tags of the configured source are merged in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryOptions {
    pub versions: Option<String>,
    pub fetch: bool,
}

/// Filter a raw version list
pub fn run_filter(versions: &str, options: &FilterOptions) -> Result<Vec<Version>> {
    let versions = parse_version_list(versions).context("Invalid --versions list")?;
    debug!(count = versions.len(), "parsed versions");
    Ok(apply_filters(versions, &options.filters())?)
}

/// Fetch the versions of the configured project, highest first
///
/// `extra` versions are merged with the fetched ones before sorting and
/// filtering.
pub fn run_fetch(
    source: &dyn TagSource,
    config: &Config,
    extra: Option<&str>,
    options: &FilterOptions,
) -> Result<Vec<Version>> {
    let mut versions = fetch_project_versions(source, config)?;

    if let Some(extra) = extra {
        debug!(extra, "merging versions");
        versions.extend(parse_version_list(extra).context("Invalid --versions list")?);
    }

    sort_descending(&mut versions);
    Ok(apply_filters(versions, &options.filters())?)
}

/// Increment a single version
pub fn run_increment_version(source_version: &Version, level: Increment) -> Version {
    let next = increment_release(source_version, level);
    info!(from = %source_version, to = %next, %level, "incremented version");
    next
}

/// Compute the next release on a release-only stream
pub fn run_increment_stream(
    source: &dyn TagSource,
    config: &Config,
    stream: &VersionPattern,
    level: Increment,
    history: &HistoryOptions,
) -> Result<Version> {
    let versions = collect_history(source, config, history)?;
    let next = increment_release_from_stream(&versions, stream, level)
        .with_context(|| format!("Cannot increment stream '{}'", stream))?;
    info!(%stream, %next, %level, "incremented stream");
    Ok(next)
}

/// Promote a version onto a target stream
pub fn run_promote(
    source: &dyn TagSource,
    config: &Config,
    source_version: &Version,
    target_stream: &VersionPattern,
    history: &HistoryOptions,
) -> Result<Version> {
    let versions = collect_history(source, config, history)?;
    let promoted = promote_prerelease(source_version, target_stream, &versions).with_context(
        || format!("Cannot promote {} to '{}'", source_version, target_stream),
    )?;
    info!(
        from = %source_version,
        to = %promoted,
        release_change = %increment_kind_between(source_version, &promoted),
        "promoted version"
    );
    Ok(promoted)
}

fn collect_history(
    source: &dyn TagSource,
    config: &Config,
    history: &HistoryOptions,
) -> Result<Vec<Version>> {
    let mut versions = match &history.versions {
        Some(raw) => parse_version_list(raw).context("Invalid --versions list")?,
        None => Vec::new(),
    };
    if history.fetch {
        versions.extend(fetch_project_versions(source, config)?);
    }
    debug!(count = versions.len(), "collected version history");
    Ok(versions)
}

fn fetch_project_versions(source: &dyn TagSource, config: &Config) -> Result<Vec<Version>> {
    let format = config.tags.tag_format()?;
    let owner = config.source.owner.as_deref().unwrap_or_default();
    let repository = config.source.repository.as_deref().unwrap_or_default();

    fetch_versions(source, owner, repository, &format)
        .with_context(|| format!("Failed to fetch tags from {}", source.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn p(s: &str) -> VersionPattern {
        VersionPattern::parse(s).unwrap()
    }

    #[test]
    fn test_filter_options_order() {
        let options = FilterOptions {
            stream: Some(p("1.*.*")),
            release: true,
            highest: true,
        };
        assert_eq!(
            options.filters(),
            vec![Filter::Pattern(p("1.*.*")), Filter::ReleaseOnly, Filter::Highest]
        );
        assert!(FilterOptions::default().filters().is_empty());
    }

    #[test]
    fn test_run_filter() {
        let options = FilterOptions {
            stream: Some(p("1.2.*")),
            highest: true,
            ..FilterOptions::default()
        };
        let result = run_filter("1.0.0 1.2.0 1.2.4 2.3.4", &options).unwrap();
        assert_eq!(result, vec![v("1.2.4")]);
    }

    #[test]
    fn test_run_filter_rejects_invalid_list() {
        assert!(run_filter("1.0.0 nope", &FilterOptions::default()).is_err());
    }

    #[test]
    fn test_run_fetch_sorts_and_merges() {
        let source = StaticSource::new(["v1.0.0", "v2.0.0-rc.1", "nightly", "v1.1.0"]);
        let config = Config::from_toml("[tags]\nformat = \"v{version}\"\n").unwrap();
        let result = run_fetch(&source, &config, Some("0.9.0"), &FilterOptions::default()).unwrap();
        assert_eq!(
            result,
            vec![v("2.0.0-rc.1"), v("1.1.0"), v("1.0.0"), v("0.9.0")]
        );
    }

    #[test]
    fn test_run_fetch_with_filters() {
        let source = StaticSource::new(["1.0.0", "2.0.0-rc.1", "1.1.0"]);
        let options = FilterOptions {
            release: true,
            highest: true,
            ..FilterOptions::default()
        };
        let result = run_fetch(&source, &Config::default(), None, &options).unwrap();
        assert_eq!(result, vec![v("1.1.0")]);
    }

    #[test]
    fn test_run_increment_version() {
        assert_eq!(
            run_increment_version(&v("1.2.3-rc.1"), Increment::Minor),
            v("1.3.0")
        );
    }

    #[test]
    fn test_run_increment_stream_uses_fetched_history() {
        let source = StaticSource::new(["3.0.0", "3.1.0"]);
        let history = HistoryOptions {
            versions: Some("3.1.1-rc.0".to_string()),
            fetch: true,
        };
        let next = run_increment_stream(
            &source,
            &Config::default(),
            &p("3.*.*"),
            Increment::Patch,
            &history,
        )
        .unwrap();
        assert_eq!(next, v("3.1.1"));
    }

    #[test]
    fn test_run_increment_stream_ignores_source_without_fetch() {
        let source = StaticSource::new(["3.0.0"]);
        let next = run_increment_stream(
            &source,
            &Config::default(),
            &p("3.*.*"),
            Increment::Minor,
            &HistoryOptions::default(),
        )
        .unwrap();
        assert_eq!(next, v("3.0.0"));
    }

    #[test]
    fn test_run_promote() {
        let history = HistoryOptions {
            versions: Some("1.2.0-rc.0, 1.2.0-rc.1".to_string()),
            fetch: false,
        };
        let promoted = run_promote(
            &StaticSource::empty(),
            &Config::default(),
            &v("1.2.0-beta.0"),
            &p("1.*.*-rc.*"),
            &history,
        )
        .unwrap();
        assert_eq!(promoted, v("1.2.0-rc.2"));
    }
}
