//! Court Finder - locating sports courts in satellite imagery
//!
//! This library holds the geospatial core of Court Finder: distance math,
//! Web Mercator tile addressing, projection of detections from tile pixels
//! onto the map, and deduplication of detected courts.
//!
//! # Example
//!
//! ```
//! use courtfinder::{haversine_meters, tile_center_lat_lng, GeoPoint};
//!
//! let center = tile_center_lat_lng(16, 19295, 24640);
//! let nyc = GeoPoint::new(40.7128, -74.0060);
//! assert!(haversine_meters(center, nyc) < 500.0);
//! ```

pub mod config;
pub mod coord;
pub mod courts;
pub mod detection;
pub mod logging;
pub mod provider;
pub mod spatial;

pub use coord::{tile_center_lat_lng, TileCoord};
pub use spatial::{haversine_meters, meters_to_lat_degrees, meters_to_lng_degrees, GeoPoint};

/// Version of the Court Finder library and CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
