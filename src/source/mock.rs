use crate::error::Result;
use crate::source::TagSource;

/// Tag source serving a fixed list, without any I/O
///
/// The empty instance backs dry runs.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    tags: Vec<String>,
}

impl StaticSource {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StaticSource {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// A source that has no tags at all
    pub fn empty() -> Self {
        StaticSource::default()
    }

    /// Add a tag to the list
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }
}

impl TagSource for StaticSource {
    fn list_tags(&self, _owner: &str, _repository: &str) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
