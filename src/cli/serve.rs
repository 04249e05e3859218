use super::ExporterArgs;
use crate::Server;
use anyhow::Result;
use tracing::{info, warn};

pub async fn run(args: ExporterArgs) -> Result<()> {
    let config = args.load_config()?;

    // Initialize logging
    crate::logging::init_logging(&config.logging.level, &config.logging.format)?;

    info!("Starting redis-exporter v{}", crate::VERSION);
    if let Some(path) = &args.config {
        info!("Loaded configuration from: {}", path.display());
    }

    // Validate configuration
    for warning in config.validate()? {
        warn!("{}", warning);
    }

    // Parse the Redis URL and register descriptors before binding
    let exporter = super::build_exporter(&config)?;

    let server = Server::new(exporter, &config);
    server.serve().await?;

    Ok(())
}
