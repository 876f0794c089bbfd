//! LiftOff command-line entry point.
//!
//! # Responsibility
//! - Wire config, logging and the SQLite-backed store into the core
//!   components.
//! - Expose library, appearance and tier operations as subcommands.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use liftoff_core::{init_logging, open_db, CoreConfig, SqliteKeyValueStore};
use std::path::PathBuf;

mod commands;

use commands::{appearance, config, library, request, store, tier};

#[derive(Parser)]
#[command(name = "liftoff")]
#[command(about = "LiftOff - saved study material and personalization")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (defaults to ~/.config/liftoff/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage saved notes and flowcharts
    Library {
        #[command(subcommand)]
        command: library::LibraryCommands,
    },
    /// Show or change the colour theme
    Theme {
        #[command(subcommand)]
        command: appearance::ThemeCommands,
    },
    /// Show or change the text size
    TextSize {
        #[command(subcommand)]
        command: appearance::TextSizeCommands,
    },
    /// Show or record the subscription tier
    Tier {
        #[command(subcommand)]
        command: tier::TierCommands,
    },
    /// Send a request to the backend with the tier header attached
    Request(request::RequestArgs),
    /// Show or write the configuration file
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
    /// Inspect the raw key/value store
    Store {
        #[command(subcommand)]
        command: store::StoreCommands,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(CoreConfig::config_file_path);
    let config =
        CoreConfig::load_from_path(&config_path).context("failed to load configuration")?;

    // Config commands work without a store or log directory.
    let command = match cli.command {
        Commands::Config { command } => return config::run(command, &config, &config_path),
        other => other,
    };

    let log_dir = config.resolved_log_dir();
    for dir in [&config.data_dir, &log_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory `{}`", dir.display()))?;
    }
    // Logging requires an absolute directory; config may hold a relative one.
    let log_dir = std::fs::canonicalize(&log_dir)?;
    init_logging(&config.log_level, &log_dir).context("failed to initialize logging")?;
    log::info!(
        "event=cli_start module=cli status=ok version={}",
        liftoff_core::core_version()
    );

    let conn = open_db(config.store_path())
        .with_context(|| format!("failed to open store `{}`", config.store_path().display()))?;
    let store = SqliteKeyValueStore::try_new(&conn).context("store is not ready")?;

    match command {
        Commands::Library { command } => library::run(command, &store, cli.json),
        Commands::Theme { command } => appearance::run_theme(command, &store, cli.json),
        Commands::TextSize { command } => appearance::run_text_size(command, &store),
        Commands::Tier { command } => tier::run(command, &store, cli.json),
        Commands::Request(args) => request::run(args, &store, &config),
        Commands::Store { command } => store::run(command, &store, cli.json),
        Commands::Config { .. } => unreachable!("config commands return before the store opens"),
    }
}
