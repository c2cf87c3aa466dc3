//! Distance and unit conversion commands.

use serde_json::json;
use tracing::debug;

use courtfinder::{haversine_meters, meters_to_lat_degrees, meters_to_lng_degrees, GeoPoint};

use super::common::{format_distance, print_json};
use crate::error::CliError;

/// Print the great-circle distance between two points.
pub fn run_distance(from: GeoPoint, to: GeoPoint, json: bool) -> Result<(), CliError> {
    let meters = haversine_meters(from, to);
    debug!(%from, %to, meters, "computed distance");

    if json {
        return print_json(&json!({
            "from": from,
            "to": to,
            "meters": meters,
        }));
    }

    println!("From:     {}", from);
    println!("To:       {}", to);
    println!("Distance: {} ({:.3} m)", format_distance(meters), meters);
    Ok(())
}

/// Print the latitude and longitude spans covered by a distance.
pub fn run_meters(meters: f64, at_lat: f64, json: bool) -> Result<(), CliError> {
    let lat_degrees = meters_to_lat_degrees(meters);
    let lng_degrees = meters_to_lng_degrees(meters, at_lat);

    if json {
        return print_json(&json!({
            "meters": meters,
            "atLat": at_lat,
            "latDegrees": lat_degrees,
            "lngDegrees": lng_degrees,
        }));
    }

    println!("{} m at latitude {}:", meters, at_lat);
    println!("  Latitude span:  {:.8}°", lat_degrees);
    println!("  Longitude span: {:.8}°", lng_degrees);
    Ok(())
}
