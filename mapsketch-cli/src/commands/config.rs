//! Configuration management CLI commands.

use std::path::Path;

use clap::Subcommand;
use mapsketch::config::{config_file_path, ConfigFile, API_KEY_ENV};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the configuration file path
    Path,

    /// Show the effective configuration
    Show,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    let path = config_file_path();
    match command {
        ConfigCommands::Init { force } => run_init(&path, force),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => run_show(&path),
    }
}

fn run_init(path: &Path, force: bool) -> Result<(), CliError> {
    if force {
        ConfigFile::default().save_to(path)?;
    } else if !ConfigFile::ensure_exists_at(path)? {
        println!("Configuration already exists at {}", path.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    println!("Wrote default configuration to {}", path.display());
    println!("Set geocoder.api_key there or export {}.", API_KEY_ENV);
    Ok(())
}

fn run_show(path: &Path) -> Result<(), CliError> {
    let config = ConfigFile::load_from(path)?.with_env_overrides();

    println!("Configuration: {}", path.display());
    println!();
    println!("[geocoder]");
    println!(
        "  api_key = {}",
        if config.geocoder.api_key.is_some() {
            "(set)"
        } else {
            "(not set)"
        }
    );
    println!("  base_url = {}", config.geocoder.base_url);
    println!("  timeout_secs = {}", config.geocoder.timeout_secs);
    println!(
        "  language = {}",
        config.geocoder.language.as_deref().unwrap_or("(not set)")
    );
    println!("[map]");
    println!("  default_zoom = {}", config.map.default_zoom);
    println!("  search_zoom = {}", config.map.search_zoom);
    println!("  satellite = {}", config.map.satellite);
    println!("[location]");
    match config.location.position {
        Some(position) => println!("  position = {}", position),
        None => println!("  position = (not set)"),
    }
    println!("  interval_secs = {}", config.location.interval_secs);
    println!("[logging]");
    println!("  file = {}", config.logging.file.display());

    Ok(())
}
