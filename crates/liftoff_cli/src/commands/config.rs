use anyhow::{bail, Context, Result};
use clap::Subcommand;
use liftoff_core::CoreConfig;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write the effective configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(command: ConfigCommands, config: &CoreConfig, path: &Path) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            println!("# {}", path.display());
            println!("data_dir = {}", config.data_dir.display());
            println!("log_dir = {}", config.resolved_log_dir().display());
            println!("log_level = {}", config.log_level);
            println!(
                "api_base_url = {}",
                config.api_base_url.as_deref().unwrap_or("(not set)")
            );
            println!("api_path_marker = {}", config.api_path_marker);
            println!("request_timeout_secs = {}", config.request_timeout_secs);
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                bail!("config file `{}` already exists; pass --force to overwrite", path.display());
            }
            config
                .save_to_path(path)
                .with_context(|| format!("failed to write `{}`", path.display()))?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
