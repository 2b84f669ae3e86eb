// Application configuration.
// TOML file with per-section defaults, plus environment overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SiteError};

pub const ENV_BASE_URL: &str = "SITEFRONT_BASE_URL";
pub const ENV_CACHE_EXPIRATION: &str = "SITEFRONT_CACHE_EXPIRATION";
pub const ENV_LOG_LEVEL: &str = "SITEFRONT_LOG_LEVEL";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the site's data lives and where its routes are mounted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteSettings {
    /// Origin serving the `/data/*.json` files.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Prefix all routes live under.
    #[serde(default = "default_base_path")]
    pub base_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpSettings {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheSettings {
    /// How long a fetched resource is served from memory.
    #[serde(default = "default_expiration")]
    pub expiration_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SiteError::Config(format!("{}: {}", path.display(), e)))?;

        // Validated by the caller once overrides are applied
        Ok(toml::from_str(&content)?)
    }

    /// Load an explicit path, or the default location if it exists, or defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SiteError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.site.base_url)
            .map_err(|_| SiteError::InvalidUrl(self.site.base_url.clone()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SiteError::InvalidUrl(format!(
                "{} (expected http or https)",
                self.site.base_url
            )));
        }

        if !self.site.base_path.starts_with('/') {
            return Err(SiteError::Config(format!(
                "base_path must start with '/': {}",
                self.site.base_path
            )));
        }

        if self.http.timeout_secs == 0 {
            return Err(SiteError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.site.base_url = url;
        }

        if let Some(secs) = lookup(ENV_CACHE_EXPIRATION).and_then(|v| v.parse().ok()) {
            self.cache.expiration_secs = secs;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
    }

    pub fn cache_expiration(&self) -> Duration {
        Duration::from_secs(self.cache.expiration_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "sitefront")
    }

    /// Default config file (~/.config/sitefront/config.toml on Linux).
    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Default log file used while the TUI owns the terminal.
    pub fn default_log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.cache_dir().join("sitefront.log"))
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            base_path: default_base_path(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            expiration_secs: default_expiration(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5173/".to_string()
}
fn default_base_path() -> String {
    "/".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_user_agent() -> String {
    format!("sitefront/{}", env!("CARGO_PKG_VERSION"))
}
fn default_expiration() -> u64 {
    5 * 60
}
fn default_log_level() -> String {
    "info".to_string()
}
