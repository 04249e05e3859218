//! Default values for configuration options

use super::KeyCountMethod;

// Server defaults
pub(super) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(super) fn default_port() -> u16 {
    9091
}

// Redis defaults
pub(super) fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

pub(super) fn default_key_count() -> KeyCountMethod {
    KeyCountMethod::Keys
}

// Metrics defaults
pub(super) fn default_metrics_endpoint() -> String {
    "/metrics".to_string()
}

pub(super) fn default_scrape_timeout_ms() -> u64 {
    1000
}

// Logging defaults
pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_log_format() -> String {
    "text".to_string()
}
