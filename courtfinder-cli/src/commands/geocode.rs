//! Reverse geocoding command.

use serde_json::json;

use courtfinder::config::ConfigFile;
use courtfinder::provider::{ReqwestClient, ReverseGeocoder};
use courtfinder::GeoPoint;

use super::common::print_json;
use crate::error::CliError;

/// Resolve a point to the name of the place containing it.
///
/// Without a token or on any lookup failure the coordinates are printed.
pub fn run(point: GeoPoint, config: &ConfigFile, json: bool) -> Result<(), CliError> {
    let client = ReqwestClient::new()?;
    let geocoder = ReverseGeocoder::new(client, config.mapbox.access_token.clone());
    let name = geocoder.reverse_geocode(point);

    if json {
        return print_json(&json!({
            "lat": point.lat,
            "lng": point.lng,
            "name": name,
        }));
    }

    println!("{}", name);
    Ok(())
}
