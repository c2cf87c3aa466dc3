//! Court lookup commands over an exported court list.

use std::path::PathBuf;

use clap::Subcommand;
use serde_json::json;

use courtfinder::config::ConfigFile;
use courtfinder::courts::{courts_in_viewport, find_nearby_court, Court, StatusFilter};
use courtfinder::detection::Geometry;
use courtfinder::GeoPoint;

use super::common::{format_distance, print_json, read_json, BboxArgs, PointArgs};
use crate::error::CliError;

/// Court subcommands.
#[derive(Debug, Subcommand)]
pub enum CourtsCommands {
    /// Find the verified court a new detection would merge into
    Nearby {
        /// Court list (JSON array), or `-` for stdin
        input: PathBuf,

        #[command(flatten)]
        point: PointArgs,

        /// Facility class of the detection, e.g. tennis-court
        #[arg(long)]
        class: String,
    },

    /// List the courts visible in a viewport as GeoJSON
    Viewport {
        /// Court list (JSON array), or `-` for stdin
        input: PathBuf,

        #[command(flatten)]
        bbox: BboxArgs,

        /// Zoom level of the map (defaults to mapbox.zoom)
        #[arg(long)]
        zoom: Option<u8>,

        /// Which courts to list: all, verified or pending
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
}

/// Run a courts subcommand.
pub fn run(command: CourtsCommands, config: &ConfigFile, json: bool) -> Result<(), CliError> {
    match command {
        CourtsCommands::Nearby {
            input,
            point,
            class,
        } => {
            let courts: Vec<Court> = read_json(&input)?;
            let dedup = config.dedup_config();
            let found = find_nearby_court(&courts, point.point(), &class, &dedup);

            if json {
                return print_json(&json!({
                    "class": class,
                    "radiusMeters": dedup.radius_for(&class),
                    "court": found,
                }));
            }

            match found {
                Some(court) => println!(
                    "Matches court {} ({} away)",
                    court.id,
                    format_distance(court.distance)
                ),
                None => println!(
                    "No verified {} within {} m",
                    class,
                    dedup.radius_for(&class)
                ),
            }
            Ok(())
        }
        CourtsCommands::Viewport {
            input,
            bbox,
            zoom,
            status,
        } => {
            let courts: Vec<Court> = read_json(&input)?;
            let zoom = zoom.unwrap_or(config.mapbox.zoom);
            let collection = courts_in_viewport(&courts, &bbox.bbox(), zoom, status)?;

            if json {
                return print_json(&collection);
            }

            println!("{} courts in viewport", collection.features.len());
            for feature in &collection.features {
                let class = feature.properties.get("class").and_then(|v| v.as_str());
                let status = feature.properties.get("status").and_then(|v| v.as_str());
                let location = match &feature.geometry {
                    Geometry::Point { coordinates } => {
                        GeoPoint::new(coordinates[1], coordinates[0]).to_string()
                    }
                    Geometry::Polygon { .. } => String::new(),
                };
                println!(
                    "  {:<20} {:<9} {}",
                    class.unwrap_or("unknown"),
                    status.unwrap_or(""),
                    location
                );
            }
            Ok(())
        }
    }
}
