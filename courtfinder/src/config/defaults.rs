//! Default configuration values.

use crate::coord::DEFAULT_ZOOM;
use crate::courts::{DEFAULT_BASE_RADIUS_M, DEFAULT_CONFIDENCE_TIE_EPSILON};
use crate::provider::{DEFAULT_STYLE_ID, DEFAULT_USERNAME};

/// Environment variable that overrides `mapbox.access_token`.
pub const MAPBOX_TOKEN_ENV: &str = "MAPBOX_API_KEY";

pub const DEFAULT_MAPBOX_USERNAME: &str = DEFAULT_USERNAME;
pub const DEFAULT_MAPBOX_STYLE_ID: &str = DEFAULT_STYLE_ID;
pub const DEFAULT_TILE_SIZE: u32 = 512;
pub const DEFAULT_SCAN_ZOOM: u8 = DEFAULT_ZOOM;

/// Tiles scanned on each side of the center tile (a 5×5 grid).
pub const DEFAULT_TILE_RADIUS: u32 = 2;

/// Largest radius accepted from configuration.
pub const MAX_TILE_RADIUS: u32 = 10;

pub const DEFAULT_DEDUP_BASE_RADIUS_M: f64 = DEFAULT_BASE_RADIUS_M;
pub const DEFAULT_DEDUP_TIE_EPSILON: f64 = DEFAULT_CONFIDENCE_TIE_EPSILON;

pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILE: &str = "courtfinder.log";
