//! Tag sources: where raw tag strings come from
//!
//! The primary abstraction is the [TagSource] trait, which lists the raw tag
//! names of a repository or registry. The concrete implementations are:
//!
//! - [github::GithubSource]: GitHub REST API
//! - [gitlab::GitlabSource]: GitLab REST API
//! - [oci::OciSource]: OCI distribution registry (`/v2/<name>/tags/list`)
//! - [git::GitSource]: a local git repository, read through `git2`
//! - [mock::StaticSource]: a fixed list, used for dry runs and tests
//!
//! Tag names are returned as-is. Turning them into versions, and skipping the
//! ones that are not SemVer compliant, is done by [fetch_versions].

pub mod git;
pub mod github;
pub mod gitlab;
pub mod mock;
pub mod oci;

pub use git::GitSource;
pub use github::GithubSource;
pub use gitlab::GitlabSource;
pub use mock::StaticSource;
pub use oci::OciSource;

use crate::config::SourceConfig;
use crate::domain::{TagFormat, Version};
use crate::error::{Result, SmgrError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

pub(crate) const USER_AGENT: &str = concat!("smgr/", env!("CARGO_PKG_VERSION"));
pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// A host that can list the raw tag names of a repository
///
/// `owner` and `repository` identify the project on remote hosts. Local
/// sources ignore them.
pub trait TagSource {
    /// List raw tag names
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Tag names in host order
    /// * `Err` - If the host cannot be reached or answers with an error
    fn list_tags(&self, owner: &str, repository: &str) -> Result<Vec<String>>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Supported tag hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    #[default]
    Github,
    Gitlab,
    Oci,
    Git,
    DryRun,
}

impl FromStr for Platform {
    type Err = SmgrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "github" => Ok(Platform::Github),
            "gitlab" => Ok(Platform::Gitlab),
            "oci" => Ok(Platform::Oci),
            "git" => Ok(Platform::Git),
            "dry-run" => Ok(Platform::DryRun),
            other => Err(SmgrError::config(format!(
                "unknown platform '{}', expected one of github, gitlab, oci, git, dry-run",
                other
            ))),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Github => "github",
            Platform::Gitlab => "gitlab",
            Platform::Oci => "oci",
            Platform::Git => "git",
            Platform::DryRun => "dry-run",
        };
        f.write_str(name)
    }
}

/// Build the tag source described by `config`
///
/// A dry run always gets a source without tags, whatever the configured
/// platform is.
pub fn build_source(config: &SourceConfig, dry_run: bool) -> Result<Box<dyn TagSource>> {
    let platform = if dry_run {
        Platform::DryRun
    } else {
        config.platform
    };
    debug!(%platform, "building tag source");

    let source: Box<dyn TagSource> = match platform {
        Platform::Github => Box::new(GithubSource::new(
            config.api_url.as_deref(),
            config.token.as_deref(),
        )?),
        Platform::Gitlab => Box::new(GitlabSource::new(
            config.api_url.as_deref(),
            config.token.as_deref(),
        )?),
        Platform::Oci => Box::new(OciSource::new(
            config.api_url.as_deref(),
            config.token.as_deref(),
        )?),
        Platform::Git => Box::new(GitSource::open(
            config.path.as_deref().unwrap_or(Path::new(".")),
        )?),
        Platform::DryRun => Box::new(StaticSource::empty()),
    };
    Ok(source)
}

/// List the tags of `owner/repository` and keep the SemVer compliant ones
///
/// Tags that do not follow `format`, or whose version part is not a valid
/// SemVer string, are skipped.
pub fn fetch_versions(
    source: &dyn TagSource,
    owner: &str,
    repository: &str,
    format: &TagFormat,
) -> Result<Vec<Version>> {
    info!(source = source.name(), owner, repository, "fetching tags");
    let tags = source.list_tags(owner, repository)?;
    let versions = format.versions_from_tags(tags.as_slice());
    debug!(
        tags = tags.len(),
        versions = versions.len(),
        "kept SemVer compliant tags"
    );
    Ok(versions)
}

/// Fail early when a remote host is missing its project coordinates
pub(crate) fn require_project<'a>(
    platform: Platform,
    owner: &'a str,
    repository: &'a str,
) -> Result<(&'a str, &'a str)> {
    if owner.trim().is_empty() {
        return Err(SmgrError::config(format!("{} source requires an owner", platform)));
    }
    if repository.trim().is_empty() {
        return Err(SmgrError::config(format!(
            "{} source requires a repository",
            platform
        )));
    }
    Ok((owner.trim(), repository.trim()))
}

/// Shared blocking HTTP client for the remote sources
pub(crate) fn http_client() -> Result<reqwest::blocking::Client> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Turn a non-success response into a source error carrying the body
pub(crate) fn check_status(
    platform: Platform,
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(SmgrError::tag_source(format!(
        "{} answered HTTP {}: {}",
        platform,
        status,
        body.trim()
    )))
}
