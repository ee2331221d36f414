use crate::domain::Version;
use crate::error::{Result, SmgrError};
use regex::Regex;
use tracing::debug;

pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Tag naming format (e.g., "{version}", "v{version}", "release-{version}")
#[derive(Debug, Clone)]
pub struct TagFormat {
    template: String,
    regex: Regex,
}

impl TagFormat {
    /// Build a tag format from a template containing one `{version}` placeholder
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if template.matches(VERSION_PLACEHOLDER).count() != 1 {
            return Err(SmgrError::tag(format!(
                "format '{}' must contain the {} placeholder exactly once",
                template, VERSION_PLACEHOLDER
            )));
        }

        // Escape everything, then open a capture where the placeholder was
        let escaped = regex::escape(&template);
        let pattern = escaped.replace(r"\{version\}", r"(?P<version>.+)");
        let regex = Regex::new(&format!("^{}$", pattern))
            .map_err(|e| SmgrError::tag(format!("invalid format '{}': {}", template, e)))?;

        Ok(TagFormat { template, regex })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render a version as a tag
    /// Example: template="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        self.template
            .replace(VERSION_PLACEHOLDER, &version.to_string())
    }

    /// The version part of `tag`, if the tag follows this format
    pub fn version_part<'a>(&self, tag: &'a str) -> Option<&'a str> {
        self.regex
            .captures(tag)
            .and_then(|caps| caps.name("version"))
            .map(|m| m.as_str())
    }

    /// Parse the SemVer version carried by `tag`
    ///
    /// Returns `None` for tags outside this format and for tags whose version
    /// part is not SemVer compliant.
    pub fn parse_tag(&self, tag: &str) -> Option<Version> {
        let Some(raw) = self.version_part(tag) else {
            debug!(tag, format = %self.template, "skipping tag outside the tag format");
            return None;
        };
        match Version::parse(raw) {
            Ok(version) => Some(version),
            Err(e) => {
                debug!(tag, error = %e, "skipping non SemVer tag");
                None
            }
        }
    }

    /// Keep the SemVer compliant tags of `tags`, in order
    pub fn versions_from_tags<S: AsRef<str>>(&self, tags: &[S]) -> Vec<Version> {
        tags.iter()
            .filter_map(|tag| self.parse_tag(tag.as_ref()))
            .collect()
    }
}
