//! Config command implementation.
//!
//! Shows the effective engine configuration or writes a default file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use riskshare_portfolio::EngineConfig;

use crate::cli::{OutputFormat, OutputOptions};
use crate::error::CliError;
use crate::output::{print_json, print_success};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with default settings
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the file
    #[arg(long, default_value = "riskshare.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, config: &EngineConfig, output: OutputOptions) -> Result<()> {
    match args.command {
        ConfigCommand::Show => match output.format {
            OutputFormat::Json => print_json(config),
            _ => {
                print!("{}", config.to_toml_string()?);
                Ok(())
            }
        },
        ConfigCommand::Init(init) => {
            if init.path.exists() && !init.force {
                return Err(CliError::FileExists(init.path.display().to_string()).into());
            }
            std::fs::write(&init.path, EngineConfig::default().to_toml_string()?)
                .map_err(CliError::from)?;
            if !output.quiet {
                print_success(&format!("Wrote {}", init.path.display()));
            }
            Ok(())
        }
    }
}
