//! Court Finder CLI - Command-line interface
//!
//! Plans satellite scans, converts detections to map features and works with
//! exported court lists, using the `courtfinder` library.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::common::{parse_lat_lng, PointArgs};
use commands::config::ConfigCommands;
use commands::courts::CourtsCommands;
use commands::detect::DetectCommands;
use commands::tiles::TileCommands;
use courtfinder::GeoPoint;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "courtfinder")]
#[command(version = courtfinder::VERSION)]
#[command(about = "Find sports courts in satellite imagery", long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Echo log events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Great-circle distance between two points
    Distance {
        /// Start point as LAT,LNG
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        from: GeoPoint,

        /// End point as LAT,LNG
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        to: GeoPoint,
    },

    /// Convert a distance in meters to latitude and longitude spans
    Meters {
        /// Distance in meters
        #[arg(allow_negative_numbers = true)]
        meters: f64,

        /// Latitude the east-west span is measured at
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        at_lat: f64,
    },

    /// Tile lookup and scan planning
    Tile {
        #[command(subcommand)]
        action: TileCommands,
    },

    /// Convert detections to map features
    Detect {
        #[command(subcommand)]
        action: DetectCommands,
    },

    /// Match detections against courts and list courts in a viewport
    Courts {
        #[command(subcommand)]
        action: CourtsCommands,
    },

    /// Name the place containing a point (coordinates when no name resolves)
    Geocode {
        #[command(flatten)]
        point: PointArgs,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Distance { .. } => "distance",
            Commands::Meters { .. } => "meters",
            Commands::Tile { .. } => "tile",
            Commands::Detect { .. } => "detect",
            Commands::Courts { .. } => "courts",
            Commands::Geocode { .. } => "geocode",
            Commands::Config { .. } => "config",
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let json = cli.json;

    // Config commands edit the file itself and do not log
    if let Commands::Config { action } = cli.command {
        return commands::config::run(action, json);
    }

    let runner = CliRunner::new(cli.verbose)?;
    runner.log_startup(cli.command.name());
    let config = runner.config();

    match cli.command {
        Commands::Distance { from, to } => commands::geo::run_distance(from, to, json),
        Commands::Meters { meters, at_lat } => commands::geo::run_meters(meters, at_lat, json),
        Commands::Tile { action } => commands::tiles::run(action, config, json),
        Commands::Detect { action } => commands::detect::run(action, json),
        Commands::Courts { action } => commands::courts::run(action, config, json),
        Commands::Geocode { point } => commands::geocode::run(point.point(), config, json),
        Commands::Config { action } => commands::config::run(action, json),
    }
}
