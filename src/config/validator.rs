use super::Config;
use anyhow::{bail, Result};

pub fn validate_config(config: &Config) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    if config.metrics.scrape_timeout_ms == 0 {
        bail!("metrics.scrape_timeout_ms must be greater than 0");
    }

    if !config.metrics.endpoint.starts_with('/') {
        bail!(
            "metrics.endpoint must start with '/', got {:?}",
            config.metrics.endpoint
        );
    }

    if config.metrics.endpoint == "/" {
        bail!("metrics.endpoint cannot be '/', it is reserved for the landing page");
    }

    if config.server.port < 1024 {
        warnings.push(format!(
            "[!] Port {} requires root privileges. Consider using a port >= 1024",
            config.server.port
        ));
    }

    if config.metrics.scrape_timeout_ms > 10_000 {
        warnings.push(format!(
            "[!] Scrape timeout of {}ms is longer than most scrape intervals",
            config.metrics.scrape_timeout_ms
        ));
    }

    Ok(warnings)
}
