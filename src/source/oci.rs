use crate::error::{Result, SmgrError};
use crate::source::{check_status, http_client, require_project, Platform, TagSource};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_REGISTRY_URL: &str = "https://ghcr.io";

/// Body of `GET /v2/<name>/tags/list`
#[derive(Debug, Deserialize)]
struct TagList {
    name: String,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

/// Tag source backed by an OCI distribution registry
///
/// The image name is `owner/repository`. A token, when given, is sent as a
/// bearer token.
pub struct OciSource {
    client: Client,
    registry_url: String,
    token: Option<String>,
}

impl OciSource {
    pub fn new(registry_url: Option<&str>, token: Option<&str>) -> Result<Self> {
        Ok(OciSource {
            client: http_client()?,
            registry_url: registry_url
                .unwrap_or(DEFAULT_REGISTRY_URL)
                .trim_end_matches('/')
                .to_string(),
            token: token.map(str::to_string),
        })
    }

    fn tags_url(&self, owner: &str, repository: &str) -> String {
        format!("{}/v2/{}/{}/tags/list", self.registry_url, owner, repository)
    }
}

fn tag_names(body: &str, expected_name: &str) -> Result<Vec<String>> {
    let list: TagList = serde_json::from_str(body)?;
    if list.name != expected_name {
        return Err(SmgrError::tag_source(format!(
            "registry answered for '{}' instead of '{}'",
            list.name, expected_name
        )));
    }
    Ok(list.tags.unwrap_or_default())
}

impl TagSource for OciSource {
    fn list_tags(&self, owner: &str, repository: &str) -> Result<Vec<String>> {
        let (owner, repository) = require_project(Platform::Oci, owner, repository)?;
        let url = self.tags_url(owner, repository);
        debug!(%url, "listing registry tags");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let body = check_status(Platform::Oci, request.send()?)?.text()?;
        tag_names(&body, &format!("{}/{}", owner, repository))
    }

    fn name(&self) -> &'static str {
        "oci"
    }
}
