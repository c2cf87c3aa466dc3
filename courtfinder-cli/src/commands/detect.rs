//! Detection commands.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use tracing::info;

use courtfinder::coord::{pixel_on_tile_to_lng_lat, TileCoord};
use courtfinder::detection::{
    prediction_to_feature, FeatureCollection, FeatureOptions, InferenceResponse,
};

use super::common::{print_json, read_json};
use crate::error::CliError;

/// Detection subcommands.
#[derive(Debug, Subcommand)]
pub enum DetectCommands {
    /// Convert a detection response for one tile into GeoJSON
    Features {
        /// Detection service response (JSON), or `-` for stdin
        input: PathBuf,

        /// Tile the image was fetched for, as Z:X:Y or Z/X/Y
        #[arg(long)]
        tile: TileCoord,

        /// Include the bounding box polygon of each detection
        #[arg(long)]
        polygon: bool,
    },
}

/// Run a detection subcommand.
pub fn run(command: DetectCommands, json: bool) -> Result<(), CliError> {
    match command {
        DetectCommands::Features {
            input,
            tile,
            polygon,
        } => run_features(&input, tile, polygon, json),
    }
}

fn run_features(
    input: &Path,
    tile: TileCoord,
    include_polygon: bool,
    json: bool,
) -> Result<(), CliError> {
    let response: InferenceResponse = read_json(input)?;
    let options = FeatureOptions { include_polygon };

    let mut collection = FeatureCollection::default();
    for prediction in &response.predictions {
        let features = prediction_to_feature(&tile, prediction, response.image, options);
        collection.features.push(features.point);
        collection.features.extend(features.polygon);
    }

    info!(
        tile = %tile,
        inference_id = %response.inference_id,
        predictions = response.predictions.len(),
        features = collection.features.len(),
        "converted detections"
    );

    if json {
        return print_json(&collection);
    }

    println!("{} detections on tile {}", response.predictions.len(), tile);
    for prediction in &response.predictions {
        let center = pixel_on_tile_to_lng_lat(
            &tile,
            prediction.x,
            prediction.y,
            response.image.width,
            response.image.height,
        );
        println!(
            "  {:<20} {:>5.1}%  {}",
            prediction.class,
            prediction.confidence * 100.0,
            center
        );
    }
    Ok(())
}
