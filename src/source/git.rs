use crate::error::Result;
use crate::source::TagSource;
use git2::Repository as Git2Repo;
use std::path::Path;

/// Tag source reading the tags of a local git repository
pub struct GitSource {
    repo: Git2Repo,
}

impl GitSource {
    /// Open or discover a git repository at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(GitSource { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        GitSource { repo }
    }
}

impl TagSource for GitSource {
    fn list_tags(&self, _owner: &str, _repository: &str) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn name(&self) -> &'static str {
        "git"
    }
}
