use anyhow::Result;
use clap::{Parser, Subcommand};
use redis_exporter::cli;

#[derive(Parser)]
#[command(name = "redis-exporter")]
#[command(version = redis_exporter::VERSION)]
#[command(about = "Prometheus exporter for Redis build info and key count", long_about = None)]
struct Cli {
    #[command(flatten)]
    args: cli::ExporterArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the metrics HTTP server (default)
    Serve,

    /// Collect once and print the metrics to stdout
    Scrape,

    /// Configuration management
    Config(cli::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => cli::serve::run(cli.args).await,
        Commands::Scrape => cli::scrape::run(cli.args).await,
        Commands::Config(args) => cli::config::run(args, cli.args),
    }
}
