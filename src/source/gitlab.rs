use crate::error::Result;
use crate::source::{check_status, http_client, require_project, Platform, TagSource};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://gitlab.com/api/v4";
const PER_PAGE: u32 = 100;

#[derive(Debug, Deserialize)]
struct GitlabTag {
    name: String,
}

/// Tag source backed by the GitLab REST API
///
/// `owner` may be a nested group path such as `group/subgroup`.
pub struct GitlabSource {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GitlabSource {
    pub fn new(api_url: Option<&str>, token: Option<&str>) -> Result<Self> {
        Ok(GitlabSource {
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
            "{}/projects/{}/repository/tags?per_page={}",
            self.api_url,
            project_id(owner, repository),
            PER_PAGE
        )
    }
}

/// URL-encoded `namespace/project` path
fn project_id(owner: &str, repository: &str) -> String {
    format!("{}/{}", owner, repository).replace('/', "%2F")
}

fn tag_names(body: &str) -> Result<Vec<String>> {
    let tags: Vec<GitlabTag> = serde_json::from_str(body)?;
    Ok(tags.into_iter().map(|tag| tag.name).collect())
}

impl TagSource for GitlabSource {
    fn list_tags(&self, owner: &str, repository: &str) -> Result<Vec<String>> {
        let (owner, repository) = require_project(Platform::Gitlab, owner, repository)?;
        let url = self.tags_url(owner, repository);
        debug!(%url, "listing GitLab tags");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.header("PRIVATE-TOKEN", token);
        }

        let body = check_status(Platform::Gitlab, request.send()?)?.text()?;
        tag_names(&body)
    }

    fn name(&self) -> &'static str {
        "gitlab"
    }
}
