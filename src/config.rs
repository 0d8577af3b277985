//! Client configuration
//!
//! The API root, page size and limits live in a `ClientConfig` value that is
//! handed to a constructed client. Configs can be loaded from YAML and
//! overridden from the environment.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Environment variable overriding `api_root`
pub const ENV_API_ROOT: &str = "HUBPAGER_API_ROOT";

/// Environment variable overriding `user_agent`
pub const ENV_USER_AGENT: &str = "HUBPAGER_USER_AGENT";

/// Largest page size the API accepts
pub const MAX_PER_PAGE: u32 = 100;

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root URL that relative operation paths are joined to
    #[serde(default = "default_api_root")]
    pub api_root: String,

    /// Items requested per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Maximum pages followed in one call (`None` = unbounded)
    #[serde(default = "default_max_pages")]
    pub max_pages: Option<u32>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Optional client-side throttle
    #[serde(default)]
    pub requests_per_second: Option<u32>,

    /// Extra operations registered alongside the built-in ones
    #[serde(default)]
    pub operations: Vec<OperationDef>,
}

fn default_api_root() -> String {
    "https://api.github.com".to_string()
}

fn default_per_page() -> u32 {
    MAX_PER_PAGE
}

#[allow(clippy::unnecessary_wraps)]
fn default_max_pages() -> Option<u32> {
    Some(100)
}

fn default_user_agent() -> String {
    format!("hubpager/{} (paginated REST dispatcher)", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: default_api_root(),
            per_page: default_per_page(),
            max_pages: default_max_pages(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
            requests_per_second: None,
            operations: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at a different API root, everything else default
    pub fn with_api_root(api_root: impl Into<String>) -> Self {
        Self {
            api_root: api_root.into(),
            ..Default::default()
        }
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Parsed API root
    pub fn api_root_url(&self) -> Result<Url> {
        let url = Url::parse(&self.api_root)?;
        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "api_root '{}' cannot be used as a base URL",
                self.api_root
            )));
        }
        Ok(url)
    }

    /// Apply `HUBPAGER_*` environment overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(root) = lookup(ENV_API_ROOT).filter(|v| !v.is_empty()) {
            self.api_root = root;
        }
        if let Some(agent) = lookup(ENV_USER_AGENT).filter(|v| !v.is_empty()) {
            self.user_agent = agent;
        }
    }

    /// Check the config for values the client cannot work with
    pub fn validate(&self) -> Result<()> {
        self.api_root_url()?;

        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(Error::config(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}, got {}",
                self.per_page
            )));
        }

        if self.max_pages == Some(0) {
            return Err(Error::config("max_pages must be at least 1"));
        }

        if self.user_agent.trim().is_empty() {
            return Err(Error::config("user_agent must not be empty"));
        }

        let mut seen = HashSet::new();
        for op in &self.operations {
            if !seen.insert(op.name.as_str()) {
                return Err(Error::config(format!(
                    "operation '{}' is defined more than once",
                    op.name
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Operation Definitions
// ============================================================================

/// A named operation declared in config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDef {
    /// Operation name used for dispatch
    pub name: String,

    /// URL templates, e.g. `users/:user/gists`
    pub templates: Vec<String>,
}

// ============================================================================
// Loader Functions
// ============================================================================

/// Load a config from a YAML file, then apply environment overrides
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ClientConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    let mut config = load_config_from_str(&content)?;
    config.apply_env();
    config.validate()?;
    Ok(config)
}

/// Parse a config from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<ClientConfig> {
    if yaml.trim().is_empty() {
        return Ok(ClientConfig::default());
    }
    let config: ClientConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}
