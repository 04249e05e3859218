pub mod config;
pub mod scrape;
pub mod serve;

pub use config::ConfigArgs;

use crate::config::{Config, KeyCountMethod};
use crate::metrics::{Exporter, RedisCollector};
use crate::redis::RedisStore;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Settings shared by every subcommand.
///
/// Each flag falls back to its environment variable, then to the config
/// file, then to the built-in default.
#[derive(Args, Debug, Default)]
pub struct ExporterArgs {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Port binding for the exporter metrics server [default: 9091]
    #[arg(long, env = "PORT", global = true)]
    pub port: Option<u16>,

    /// Address the metrics server listens on [default: 0.0.0.0]
    #[arg(long, env = "LISTEN_HOST", global = true)]
    pub host: Option<String>,

    /// Namespace prefix for exported metrics [default: ""]
    #[arg(long, env = "NAMESPACE", global = true)]
    pub namespace: Option<String>,

    /// Path under which metrics are exposed [default: /metrics]
    #[arg(long = "web.telemetry-path", env = "TELEMETRY_PATH", global = true)]
    pub telemetry_path: Option<String>,

    /// Deadline for all Redis queries of one scrape, in milliseconds [default: 1000]
    #[arg(long = "scrape.timeout-ms", env = "SCRAPE_TIMEOUT_MS", global = true)]
    pub scrape_timeout_ms: Option<u64>,

    /// Connection URL of the Redis server to collect metrics from [default: redis://127.0.0.1:6379]
    #[arg(long = "redis.url", env = "REDIS_URL", global = true)]
    pub redis_url: Option<String>,

    /// How the key count is computed [default: keys]
    #[arg(long = "redis.key-count", env = "REDIS_KEY_COUNT", value_enum, global = true)]
    pub key_count: Option<KeyCountMethod>,

    /// Log level or tracing filter directive [default: info]
    #[arg(long = "log.level", env = "LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Log format: text, json or pretty [default: text]
    #[arg(long = "log.format", env = "LOG_FORMAT", global = true)]
    pub log_format: Option<String>,
}

impl ExporterArgs {
    /// Effective configuration: file (if any) with flag and env overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(namespace) = &self.namespace {
            config.metrics.namespace = namespace.clone();
        }
        if let Some(path) = &self.telemetry_path {
            config.metrics.endpoint = path.clone();
        }
        if let Some(timeout) = self.scrape_timeout_ms {
            config.metrics.scrape_timeout_ms = timeout;
        }
        if let Some(url) = &self.redis_url {
            config.redis.url = url.clone();
        }
        if let Some(method) = self.key_count {
            config.redis.key_count = method;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
    }
}

/// Build the exporter without touching the network.
///
/// Fails on a malformed Redis URL or an unusable namespace.
pub fn build_exporter(config: &Config) -> Result<Exporter<RedisStore>> {
    let store = RedisStore::open(&config.redis.url)
        .context("Failed to parse redis connection URL")?;

    let collector = RedisCollector::new(store, &config.metrics.namespace)
        .with_context(|| format!("Invalid metrics namespace {:?}", config.metrics.namespace))?
        .with_timeout(config.metrics.scrape_timeout())
        .with_key_count_method(config.redis.key_count);

    Exporter::new(collector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_file_or_flags() {
        let config = ExporterArgs::default().load_config().unwrap();
        assert_eq!(config.server.port, 9091);
        assert_eq!(config.metrics.namespace, "");
        assert_eq!(config.redis.url, "redis://127.0.0.1:6379");
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        let content = r#"
[server]
port = 9200

[metrics]
namespace = "file"
scrape_timeout_ms = 500
"#;
        file.write_all(content.as_bytes()).unwrap();

        let args = ExporterArgs {
            config: Some(file.path().to_path_buf()),
            namespace: Some("flag".to_string()),
            key_count: Some(KeyCountMethod::Dbsize),
            ..Default::default()
        };

        let config = args.load_config().unwrap();
        assert_eq!(config.server.port, 9200);
        assert_eq!(config.metrics.namespace, "flag");
        assert_eq!(config.metrics.scrape_timeout_ms, 500);
        assert_eq!(config.redis.key_count, KeyCountMethod::Dbsize);
    }

    #[test]
    fn test_missing_config_file() {
        let args = ExporterArgs {
            config: Some(PathBuf::from("/nonexistent/redis-exporter.toml")),
            ..Default::default()
        };
        assert!(args.load_config().is_err());
    }

    #[test]
    fn test_build_exporter_rejects_bad_url() {
        let mut config = Config::default();
        config.redis.url = "localhost:6379 please".to_string();
        assert!(build_exporter(&config).is_err());
    }

    #[test]
    fn test_build_exporter_rejects_bad_namespace() {
        let mut config = Config::default();
        config.metrics.namespace = "my-team".to_string();
        assert!(build_exporter(&config).is_err());
    }

    #[test]
    fn test_build_exporter_applies_timeout() {
        let mut config = Config::default();
        config.metrics.scrape_timeout_ms = 250;

        let exporter = build_exporter(&config).unwrap();
        assert_eq!(
            exporter.collector().timeout(),
            std::time::Duration::from_millis(250)
        );
    }
}
