//! Tile coordinate commands.

use clap::Subcommand;
use serde_json::json;

use courtfinder::config::ConfigFile;
use courtfinder::coord::{
    point_to_tile, tile_center_lat_lng, tile_to_lng_lat_bounds, tiles_in_radius_from_point,
    tiles_intersecting_bbox, LngLatBounds,
};

use super::common::{print_json, BboxArgs, PointArgs};
use crate::error::CliError;

/// Tile subcommands.
#[derive(Debug, Subcommand)]
pub enum TileCommands {
    /// Show the geographic center of a tile
    Center {
        /// Zoom level
        z: u8,
        /// Tile column
        #[arg(allow_negative_numbers = true)]
        x: i64,
        /// Tile row
        #[arg(allow_negative_numbers = true)]
        y: i64,
    },

    /// Show the geographic bounds of a tile
    Bounds {
        /// Zoom level
        z: u8,
        /// Tile column
        #[arg(allow_negative_numbers = true)]
        x: i64,
        /// Tile row
        #[arg(allow_negative_numbers = true)]
        y: i64,
    },

    /// Find the tile containing a point
    Locate {
        #[command(flatten)]
        point: PointArgs,

        /// Zoom level (defaults to mapbox.zoom)
        #[arg(long)]
        zoom: Option<u8>,
    },

    /// List the scan grid around a point
    Radius {
        #[command(flatten)]
        point: PointArgs,

        /// Tiles on each side of the center tile (defaults to scan.tile_radius)
        #[arg(long)]
        radius: Option<u32>,

        /// Zoom level (defaults to mapbox.zoom)
        #[arg(long)]
        zoom: Option<u8>,

        /// Also print the Mapbox imagery URL of each tile
        #[arg(long)]
        urls: bool,
    },

    /// List every tile under a viewport
    Bbox {
        #[command(flatten)]
        bbox: BboxArgs,

        /// Zoom level (defaults to mapbox.zoom)
        #[arg(long)]
        zoom: Option<u8>,
    },
}

/// Run a tile subcommand.
pub fn run(command: TileCommands, config: &ConfigFile, json: bool) -> Result<(), CliError> {
    match command {
        TileCommands::Center { z, x, y } => {
            let center = tile_center_lat_lng(z, x, y);
            if json {
                return print_json(&center);
            }
            println!("{}", center);
            Ok(())
        }
        TileCommands::Bounds { z, x, y } => {
            let bounds = tile_to_lng_lat_bounds(z, x, y);
            if json {
                return print_json(&bounds);
            }
            print_bounds(&bounds);
            Ok(())
        }
        TileCommands::Locate { point, zoom } => {
            let zoom = zoom.unwrap_or(config.mapbox.zoom);
            let tile = point_to_tile(point.lat, point.lng, zoom)?;
            if json {
                return print_json(&json!({
                    "z": tile.z,
                    "x": tile.x,
                    "y": tile.y,
                    "key": tile.key(),
                }));
            }
            println!("{}", tile);
            Ok(())
        }
        TileCommands::Radius {
            point,
            radius,
            zoom,
            urls,
        } => run_radius(point, radius, zoom, urls, config, json),
        TileCommands::Bbox { bbox, zoom } => {
            let zoom = zoom.unwrap_or(config.mapbox.zoom);
            let tiles = tiles_intersecting_bbox(&bbox.bbox(), zoom)?;
            if json {
                return print_json(&tiles);
            }
            for tile in &tiles {
                println!("{}", tile);
            }
            Ok(())
        }
    }
}

fn run_radius(
    point: PointArgs,
    radius: Option<u32>,
    zoom: Option<u8>,
    urls: bool,
    config: &ConfigFile,
    json: bool,
) -> Result<(), CliError> {
    let radius = radius.unwrap_or(config.scan.tile_radius);
    let zoom = zoom.unwrap_or(config.mapbox.zoom);
    let grid = tiles_in_radius_from_point(point.lat, point.lng, radius, zoom)?;

    let tile_urls = if urls {
        let style = config.mapbox_style()?;
        grid.tiles
            .iter()
            .map(|tile| style.tile_url(tile))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        Vec::new()
    };

    if json {
        let tiles: Vec<_> = grid
            .tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| {
                json!({
                    "z": tile.z,
                    "x": tile.x,
                    "y": tile.y,
                    "center": tile.center(),
                    "url": tile_urls.get(i),
                })
            })
            .collect();
        return print_json(&json!({
            "zoom": grid.zoom,
            "cols": grid.cols,
            "rows": grid.rows,
            "tiles": tiles,
        }));
    }

    println!(
        "{}x{} grid at zoom {} ({} tiles)",
        grid.cols,
        grid.rows,
        grid.zoom,
        grid.tiles.len()
    );
    for (i, tile) in grid.tiles.iter().enumerate() {
        match tile_urls.get(i) {
            Some(url) => println!("{}  {}", tile, url),
            None => println!("{}  {}", tile, tile.center()),
        }
    }
    Ok(())
}

fn print_bounds(bounds: &LngLatBounds) {
    println!("West:  {:.6}", bounds.west);
    println!("South: {:.6}", bounds.south);
    println!("East:  {:.6}", bounds.east);
    println!("North: {:.6}", bounds.north);
}
