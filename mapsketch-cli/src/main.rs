//! mapsketch CLI - Command-line interface
//!
//! Sketch polygons on an interactive terminal map, or use the geometry and
//! geocoding pieces one command at a time.

mod commands;
mod error;
mod runner;
mod tui_app;
mod ui;

use clap::{Parser, Subcommand};
use mapsketch::coord::LatLng;

use commands::config::ConfigCommands;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "mapsketch")]
#[command(version = mapsketch::VERSION)]
#[command(about = "Sketch polygons on a map and look up their addresses", long_about = None)]
struct Cli {
    /// Default to debug logging when RUST_LOG is unset
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive map
    Run,

    /// Print the area of the polygon through the given points
    Area {
        /// Vertex as "lat,lng" (repeat, in ring order)
        #[arg(long = "point", value_name = "LAT,LNG", allow_hyphen_values = true)]
        points: Vec<LatLng>,
    },

    /// Reverse geocode one point
    Lookup {
        /// Point as "lat,lng"
        #[arg(value_name = "LAT,LNG", allow_hyphen_values = true)]
        point: LatLng,
    },

    /// Find a place by name
    Search {
        /// Place name or address
        query: String,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Area { points } => commands::area::run(&points),
        Commands::Config { command } => commands::config::run(command),
        Commands::Run => CliRunner::with_debug(cli.debug).and_then(|r| commands::run::run(&r)),
        Commands::Lookup { point } => CliRunner::with_debug(cli.debug)
            .and_then(|r| commands::geocode::run_lookup(&r, point)),
        Commands::Search { query } => CliRunner::with_debug(cli.debug)
            .and_then(|r| commands::geocode::run_search(&r, &query)),
    };

    if let Err(e) = result {
        e.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_area_accepts_negative_points() {
        let cli = Cli::try_parse_from([
            "mapsketch",
            "area",
            "--point",
            "-33.86,151.20",
            "--point",
            "-33.87,151.21",
        ])
        .unwrap();

        match cli.command {
            Commands::Area { points } => {
                assert_eq!(points.len(), 2);
                assert_eq!(points[0], LatLng::new_unchecked(-33.86, 151.20));
            }
            _ => panic!("expected area command"),
        }
    }

    #[test]
    fn test_lookup_rejects_bad_coordinate() {
        assert!(Cli::try_parse_from(["mapsketch", "lookup", "91,0"]).is_err());
        assert!(Cli::try_parse_from(["mapsketch", "lookup", "not-a-point"]).is_err());
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::try_parse_from(["mapsketch", "--debug", "config", "init", "--force"]).unwrap();
        assert!(cli.debug);
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Init { force: true }
            }
        ));
    }
}
