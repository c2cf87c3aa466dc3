//! Coordinate type definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Web Mercator valid latitude range
pub const MAX_MERCATOR_LAT: f64 = 85.05112878;
pub const MIN_MERCATOR_LAT: f64 = -85.05112878;

/// Valid longitude range
pub const MIN_LNG: f64 = -180.0;
pub const MAX_LNG: f64 = 180.0;

/// Highest zoom level accepted when locating points.
pub const MAX_ZOOM: u8 = 24;

/// Zoom level used for satellite scans when none is configured.
pub const DEFAULT_ZOOM: u8 = 16;

/// Most tiles a single grid or viewport query may enumerate (the whole
/// world at zoom 10).
pub const MAX_TILES_PER_QUERY: u64 = 1 << 20;

/// Tile coordinates in the Web Mercator / slippy map system.
///
/// Displayed as the tile key `z:x:y`, the form used to match detections and
/// courts against viewport tiles. `z/x/y` is also accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level
    pub z: u8,
    /// X coordinate (column, west to east), 0 at west
    pub x: u32,
    /// Y coordinate (row, north to south), 0 at north
    pub y: u32,
}

impl TileCoord {
    /// Create a new tile coordinate.
    #[inline]
    pub const fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Number of tiles along one axis at this zoom level.
    #[inline]
    pub fn tiles_per_axis(&self) -> u64 {
        1u64.checked_shl(self.z as u32).unwrap_or(u64::MAX)
    }

    /// Whether x and y fall inside `[0, 2^z - 1]`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        let n = self.tiles_per_axis();
        (self.x as u64) < n && (self.y as u64) < n
    }

    /// The tile key `z:x:y`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.z, self.x, self.y)
    }
}

impl FromStr for TileCoord {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoordError::InvalidTileKey(s.to_string());

        let mut parts = s.trim().split([':', '/']);
        let z = parts.next().ok_or_else(invalid)?;
        let x = parts.next().ok_or_else(invalid)?;
        let y = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(TileCoord {
            z: z.parse().map_err(|_| invalid())?,
            x: x.parse().map_err(|_| invalid())?,
            y: y.parse().map_err(|_| invalid())?,
        })
    }
}

/// Geographic bounds of a tile in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLatBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

/// A map viewport in degrees.
///
/// `min_lng > max_lng` means the viewport wraps across the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportBbox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl ViewportBbox {
    /// Create a new viewport.
    pub const fn new(min_lat: f64, min_lng: f64, max_lat: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            min_lng,
            max_lat,
            max_lng,
        }
    }

    /// Whether the viewport crosses the antimeridian.
    #[inline]
    pub fn crosses_dateline(&self) -> bool {
        self.min_lng > self.max_lng
    }

    /// Splits a dateline-crossing viewport into its eastern and western parts.
    ///
    /// A viewport that does not cross the dateline is returned unchanged.
    pub fn split_at_dateline(&self) -> Vec<ViewportBbox> {
        if !self.crosses_dateline() {
            return vec![*self];
        }

        vec![
            ViewportBbox::new(self.min_lat, MIN_LNG, self.max_lat, self.max_lng),
            ViewportBbox::new(self.min_lat, self.min_lng, self.max_lat, MAX_LNG),
        ]
    }
}

/// A square block of tiles around a center tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileGrid {
    /// Zoom level of every tile in the grid
    pub zoom: u8,
    /// Tiles inside the world bounds, column by column
    pub tiles: Vec<TileCoord>,
    /// Nominal grid width (2 * radius + 1)
    pub cols: u32,
    /// Nominal grid height (2 * radius + 1)
    pub rows: u32,
}

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Longitude is outside valid range (-180.0 to 180.0)
    InvalidLongitude(f64),
    /// Zoom level is outside valid range (0 to 24)
    InvalidZoom(u8),
    /// Tile key is not of the form `z:x:y`
    InvalidTileKey(String),
    /// Query would enumerate more than [`MAX_TILES_PER_QUERY`] tiles
    TooManyTiles { count: u64, limit: u64 },
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLongitude(lng) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lng, MIN_LNG, MAX_LNG
                )
            }
            CoordError::InvalidZoom(zoom) => {
                write!(
                    f,
                    "Invalid zoom level: {} (must be between 0 and {})",
                    zoom, MAX_ZOOM
                )
            }
            CoordError::InvalidTileKey(key) => {
                write!(f, "Invalid tile key: '{}' (expected z:x:y)", key)
            }
            CoordError::TooManyTiles { count, limit } => {
                write!(
                    f,
                    "Query covers {} tiles (limit {}); use a smaller area or zoom",
                    count, limit
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}
