//! Forum client configuration

use crate::validation::{ValidateConfig, validators};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the data directory
pub const STATE_DIR_ENV: &str = "FORUM_STATE_DIR";

/// Config file looked up inside the data directory
pub const CONFIG_FILE_NAME: &str = "forum.toml";

/// Token file name used when none is configured
pub const DEFAULT_TOKEN_FILE: &str = "session.jwt";

/// Settings for talking to the forum backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds, 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Threads requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Where the bearer token is kept; relative paths resolve against the data directory
    #[serde(default)]
    pub token_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            token_file: None,
        }
    }
}

impl ValidateConfig for ClientConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        validators::validate_not_empty(&self.base_url, "base_url")?;
        validators::validate_http_url(&self.base_url, "base_url")?;
        validators::validate_range(self.page_size, 1, 100, "page_size")?;
        Ok(())
    }
}

impl ClientConfig {
    /// Layer defaults, `forum.toml` from the data directory and `FORUM_*` variables
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        Self::load_from(Some(&data_dir.join(CONFIG_FILE_NAME)))
    }

    /// Layer defaults, an optional config file and `FORUM_*` variables
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_layered(path, forum_env())
    }

    fn load_layered(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Start with defaults
        builder = builder.add_source(Config::try_from(&ClientConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(env);

        let config: ClientConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Request timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Resolve the token file against the data directory
    pub fn token_path(&self, data_dir: &Path) -> PathBuf {
        match &self.token_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => data_dir.join(path),
            None => data_dir.join(DEFAULT_TOKEN_FILE),
        }
    }
}

/// Data directory from `FORUM_STATE_DIR`, else the platform data dir
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(STATE_DIR_ENV) {
        PathBuf::from(dir)
    } else {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("forum")
    }
}

/// `FORUM_BASE_URL`, `FORUM_PAGE_SIZE`, ... with `__` for nested keys
fn forum_env() -> Environment {
    Environment::with_prefix("FORUM")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_page_size() -> u32 {
    10
}
