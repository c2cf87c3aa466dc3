//! Common types and utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use clap::Args;
use serde::de::DeserializeOwned;
use serde::Serialize;

use courtfinder::coord::ViewportBbox;
use courtfinder::GeoPoint;

use crate::error::CliError;

/// A point given as `--lat`/`--lng`.
#[derive(Debug, Clone, Copy, Args)]
pub struct PointArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,
}

impl PointArgs {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// A viewport given as four edges.
#[derive(Debug, Clone, Copy, Args)]
pub struct BboxArgs {
    /// Southern edge in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub min_lat: f64,

    /// Western edge in degrees (greater than --max-lng across the dateline)
    #[arg(long, allow_negative_numbers = true)]
    pub min_lng: f64,

    /// Northern edge in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub max_lat: f64,

    /// Eastern edge in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub max_lng: f64,
}

impl BboxArgs {
    pub fn bbox(&self) -> ViewportBbox {
        ViewportBbox::new(self.min_lat, self.min_lng, self.max_lat, self.max_lng)
    }
}

/// Parse a `LAT,LNG` pair.
pub fn parse_lat_lng(s: &str) -> Result<GeoPoint, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG but got '{}'", s))?;

    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lng.trim()))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {} is outside -90 to 90", lat));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(format!("longitude {} is outside -180 to 180", lng));
    }

    Ok(GeoPoint::new(lat, lng))
}

/// Read and parse a JSON input file. `-` reads stdin.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let display = path.display().to_string();
    let read_error = |error: io::Error| CliError::FileRead {
        path: display.clone(),
        error,
    };

    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf).map_err(read_error)?;
        buf
    } else {
        fs::read(path).map_err(read_error)?
    };

    serde_json::from_slice(&bytes).map_err(|error| CliError::InvalidInput {
        path: display.clone(),
        error,
    })
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value).map_err(CliError::Output)?;
    println!("{}", text);
    Ok(())
}

/// Format a distance for humans: meters below 1km, kilometers above.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.1} m", meters)
    } else {
        format!("{:.3} km", meters / 1000.0)
    }
}
