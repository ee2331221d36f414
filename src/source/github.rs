use crate::error::Result;
use crate::source::{check_status, http_client, require_project, Platform, TagSource};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const PER_PAGE: u32 = 100;

#[derive(Debug, Deserialize)]
struct GithubTag {
    name: String,
}

/// Tag source backed by the GitHub REST API
///
/// Only the first page of tags is read.
pub struct GithubSource {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GithubSource {
    pub fn new(api_url: Option<&str>, token: Option<&str>) -> Result<Self> {
        Ok(GithubSource {
            client: http_client()?,
            api_url: api_url
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            token: token.map(str::to_string),
        })
    }

    fn tags_url(&self, owner: &str, repository: &str) -> String {
        format!(
            "{}/repos/{}/{}/tags?per_page={}",
            self.api_url, owner, repository, PER_PAGE
        )
    }
}

fn tag_names(body: &str) -> Result<Vec<String>> {
    let tags: Vec<GithubTag> = serde_json::from_str(body)?;
    Ok(tags.into_iter().map(|tag| tag.name).collect())
}

impl TagSource for GithubSource {
    fn list_tags(&self, owner: &str, repository: &str) -> Result<Vec<String>> {
        let (owner, repository) = require_project(Platform::Github, owner, repository)?;
        let url = self.tags_url(owner, repository);
        debug!(%url, "listing GitHub tags");

        let mut request = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let body = check_status(Platform::Github, request.send()?)?.text()?;
        tag_names(&body)
    }

    fn name(&self) -> &'static str {
        "github"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SmgrError;

    #[test]
    fn test_tags_url() {
        let source = GithubSource::new(None, None).unwrap();
        assert_eq!(
            source.tags_url("acme", "widgets"),
            "https://api.github.com/repos/acme/widgets/tags?per_page=100"
        );

        let source = GithubSource::new(Some("https://ghe.example.com/api/v3/"), None).unwrap();
        assert_eq!(
            source.tags_url("acme", "widgets"),
            "https://ghe.example.com/api/v3/repos/acme/widgets/tags?per_page=100"
        );
    }

    #[test]
    fn test_tag_names_from_response() {
        let body = r#"[
            {"name": "v1.1.0", "commit": {"sha": "c5b97d5", "url": "https://example.com"}},
            {"name": "v1.0.0", "zipball_url": "https://example.com/zip"}
        ]"#;
        assert_eq!(tag_names(body).unwrap(), vec!["v1.1.0", "v1.0.0"]);
    }

    #[test]
    fn test_malformed_response() {
        assert!(matches!(
            tag_names(r#"{"message": "Not Found"}"#),
            Err(SmgrError::Json(_))
        ));
    }

    #[test]
    fn test_missing_owner_fails_before_request() {
        let source = GithubSource::new(None, None).unwrap();
        assert!(matches!(
            source.list_tags("", "widgets"),
            Err(SmgrError::Config(_))
        ));
    }
}
