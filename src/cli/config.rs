use super::ExporterArgs;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Validate the file given with --config
    Check,
}

pub fn run(args: ConfigArgs, exporter_args: ExporterArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = exporter_args.load_config()?;
            print!("{}", config.to_toml()?);
            Ok(())
        }

        ConfigCommand::Check => {
            let path = exporter_args
                .config
                .as_ref()
                .context("config check requires --config <FILE>")?;
            println!("Checking configuration: {}", path.display());

            let config = exporter_args.load_config()?;
            let warnings = config.validate()?;
            super::build_exporter(&config)?;

            if warnings.is_empty() {
                println!(" Configuration is valid!");
            } else {
                println!("Configuration loaded with warnings:\n");
                for warning in warnings {
                    println!("{}", warning);
                }
            }

            Ok(())
        }
    }
}
