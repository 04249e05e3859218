mod defaults;
pub mod parser;
pub mod validator;

use anyhow::Result;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    #[serde(default = "default_redis_url")]
    pub url: String,
    #[serde(default = "default_key_count")]
    pub key_count: KeyCountMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Prefix prepended to every exported series name.
    #[serde(default)]
    pub namespace: String,
    #[serde(default = "default_metrics_endpoint")]
    pub endpoint: String,
    /// Deadline shared by all store queries of a single scrape.
    #[serde(default = "default_scrape_timeout_ms")]
    pub scrape_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// How the key count series is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KeyCountMethod {
    /// Count the keys returned by `KEYS *`.
    Keys,
    /// Ask the server for `DBSIZE`.
    Dbsize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_count: default_key_count(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            endpoint: default_metrics_endpoint(),
            scrape_timeout_ms: default_scrape_timeout_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl MetricsConfig {
    pub fn scrape_timeout(&self) -> Duration {
        Duration::from_millis(self.scrape_timeout_ms)
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self> {
        parser::parse_config(path)
    }

    /// Validate configuration, returning warnings for questionable settings
    pub fn validate(&self) -> Result<Vec<String>> {
        validator::validate_config(self)
    }

    pub fn to_toml(&self) -> Result<String> {
        parser::render_config(self)
    }
}
