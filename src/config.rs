use crate::domain::{TagFormat, VERSION_PLACEHOLDER};
use crate::error::{Result, SmgrError};
use crate::source::Platform;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CONFIG_FILE_NAME: &str = "smgr.toml";
pub const ENV_PREFIX: &str = "SMGR_";

/// Represents the complete configuration for smgr.
///
/// Contains where tags are fetched from and how tag names map to versions.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub tags: TagsConfig,
}

/// Where to read tags from.
///
/// `owner` and `repository` name the project on remote platforms, `path`
/// points at the repository for the `git` platform.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SourceConfig {
    #[serde(default)]
    pub platform: Platform,

    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default)]
    pub repository: Option<String>,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub api_url: Option<String>,

    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_tag_format() -> String {
    VERSION_PLACEHOLDER.to_string()
}

/// How tag names carry versions.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagsConfig {
    #[serde(default = "default_tag_format")]
    pub format: String,
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            format: default_tag_format(),
        }
    }
}

impl TagsConfig {
    pub fn tag_format(&self) -> Result<TagFormat> {
        TagFormat::new(self.format.as_str())
    }
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| SmgrError::config(e.to_string()))
    }

    /// Override source settings from `SMGR_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override source settings through `lookup`, which receives the full
    /// variable name (e.g. `SMGR_TOKEN`) and returns its value if set.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(&format!("{}{}", ENV_PREFIX, name)).filter(|value| !value.trim().is_empty())
        };

        if let Some(platform) = get("PLATFORM") {
            self.source.platform = platform.parse()?;
        }
        if let Some(owner) = get("OWNER") {
            self.source.owner = Some(owner);
        }
        if let Some(repository) = get("REPOSITORY") {
            self.source.repository = Some(repository);
        }
        if let Some(token) = get("TOKEN") {
            debug!("using token from environment");
            self.source.token = Some(token);
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `smgr.toml` in current directory
/// 3. `smgr/smgr.toml` in user config directory
/// 4. Default configuration if no file found
///
/// Environment overrides are not applied here, see
/// [`Config::apply_env_overrides`].
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(),
    };

    let Some(path) = path else {
        debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    info!(path = %path.display(), "loading configuration");
    let raw = fs::read_to_string(&path).map_err(|e| {
        SmgrError::config(format!("cannot read '{}': {}", path.display(), e))
    })?;
    Config::from_toml(&raw)
}

fn find_config_file() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("smgr").join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}
