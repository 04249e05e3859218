use super::ExporterArgs;
use anyhow::Result;

/// Collect once and print the exposition text to stdout.
pub async fn run(args: ExporterArgs) -> Result<()> {
    let config = args.load_config()?;

    // stdout carries the metrics
    crate::logging::init_stderr_logging(&config.logging.level)?;

    config.validate()?;

    let exporter = super::build_exporter(&config)?;
    print!("{}", exporter.render().await?);

    Ok(())
}
