//! `addonkit config init|show|path`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use addonkit_core::config;

use super::load_config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write the built-in defaults to ~/.addonkit/mirror.yaml.
    Init {
        /// Overwrite an existing config file.
        #[arg(long)]
        force: bool,
    },

    /// Print the effective mirror config as YAML.
    Show {
        /// Config file to show instead of ~/.addonkit/mirror.yaml.
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Print the location of the config file.
    Path,
}

pub fn run(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init { force } => {
            let path = config::init(force).context("failed to write default config")?;
            println!("✓ Wrote default config to {}", path.display());
        }
        ConfigCommand::Show { config } => {
            let cfg = load_config(config.as_deref())?;
            print!("{}", serde_yaml::to_string(&cfg)?);
        }
        ConfigCommand::Path => {
            let path = config::config_path().context("could not determine config path")?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
