//! Configuration management.
//!
//! Settings come from, in increasing priority: built-in defaults, a TOML
//! file, `PUBMED_PAPERS__<SECTION>__<KEY>` environment variables, and CLI
//! flags (applied by the binary).
//!
//! ```toml
//! [ncbi]
//! email = "you@example.org"
//! api_key = "..."
//! tool = "pubmed-papers"
//!
//! [search]
//! max_results = 100
//!
//! [http]
//! timeout_secs = 30
//! connect_timeout_secs = 10
//!
//! [retry]
//! max_attempts = 3
//! initial_delay_ms = 1000
//! max_delay_ms = 30000
//! backoff_multiplier = 2.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::DEFAULT_MAX_RESULTS;
use crate::sources::DEFAULT_EUTILS_BASE_URL;
use crate::utils::RetryConfig;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "pubmed-papers.toml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// NCBI E-utilities settings
    #[serde(default)]
    pub ncbi: NcbiConfig,

    /// Search defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Retry policy for transient HTTP failures
    #[serde(default)]
    pub retry: RetrySettings,
}

/// NCBI E-utilities settings.
///
/// NCBI asks clients to identify themselves with `tool` and `email`; an API
/// key raises the rate limit from 3 to 10 requests per second.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NcbiConfig {
    #[serde(default = "default_email")]
    pub email: Option<String>,

    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    #[serde(default = "default_tool")]
    pub tool: String,

    /// E-utilities base URL, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for NcbiConfig {
    fn default() -> Self {
        Self {
            email: default_email(),
            api_key: default_api_key(),
            tool: default_tool(),
            base_url: default_base_url(),
        }
    }
}

fn default_email() -> Option<String> {
    std::env::var("NCBI_EMAIL").ok().filter(|s| !s.is_empty())
}

fn default_api_key() -> Option<String> {
    std::env::var("NCBI_API_KEY").ok().filter(|s| !s.is_empty())
}

fn default_tool() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_base_url() -> String {
    DEFAULT_EUTILS_BASE_URL.to_string()
}

/// Search defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Overrides the default `pubmed-papers/<version>` user agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: None,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

/// Retry policy, in file-friendly units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl RetrySettings {
    pub fn to_retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_attempts.max(1),
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            backoff_multiplier: self.backoff_multiplier,
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("PUBMED_PAPERS").separator("__"))
        .build()?;

    settings.try_deserialize()
}

/// Get the configuration from defaults and environment only
pub fn get_config() -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix("PUBMED_PAPERS").separator("__"))
        .build()?;

    settings.try_deserialize()
}

/// Find a configuration file in the default locations
///
/// Looks for `./pubmed-papers.toml`, then `<config dir>/pubmed-papers/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("config.toml"))
        .filter(|p| p.is_file())
}

/// Render a configuration as TOML, e.g. to bootstrap a config file
pub fn to_toml(config: &Config) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}
