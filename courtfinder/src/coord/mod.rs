//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and Web Mercator slippy-map tiles, plus the tile enumerations used to plan
//! a scan: a square radius around a point, and every tile under a viewport.
//!
//! The inverse projections (`tile_center_lat_lng`, `tile_to_lng_lat_bounds`,
//! `pixel_on_tile_to_lng_lat`) never validate their indices. Out-of-range
//! tiles still produce a mathematically defined result; callers own range
//! checking.

mod types;

pub use types::{
    CoordError, LngLatBounds, TileCoord, TileGrid, ViewportBbox, DEFAULT_ZOOM, MAX_LNG,
    MAX_MERCATOR_LAT, MAX_TILES_PER_QUERY, MAX_ZOOM, MIN_LNG, MIN_MERCATOR_LAT,
};

use std::f64::consts::PI;
use std::ops::RangeInclusive;

use crate::spatial::GeoPoint;

/// Latitude of the northern edge of tile row `y` (may be fractional).
#[inline]
fn tile_y_to_lat(y: f64, n: f64) -> f64 {
    let lat_rad = (PI * (1.0 - 2.0 * (y / n))).sinh().atan();
    lat_rad.to_degrees()
}

/// Longitude of the western edge of tile column `x` (may be fractional).
#[inline]
fn tile_x_to_lng(x: f64, n: f64) -> f64 {
    x / n * 360.0 - 180.0
}

/// Converts tile indices to the geographic center of the tile.
///
/// The center is the midpoint of the tile's north/south and east/west edges
/// under the inverse Web Mercator projection. Indices are not range-checked.
///
/// # Arguments
///
/// * `z` - Zoom level
/// * `x` - Tile column (0 to 2^z - 1 for a real tile)
/// * `y` - Tile row (0 to 2^z - 1 for a real tile)
///
/// # Example
///
/// ```
/// use courtfinder::coord::tile_center_lat_lng;
///
/// let center = tile_center_lat_lng(0, 0, 0);
/// assert!(center.lat.abs() < 1e-9);
/// assert_eq!(center.lng, 0.0);
/// ```
pub fn tile_center_lat_lng(z: u8, x: i64, y: i64) -> GeoPoint {
    let bounds = tile_to_lng_lat_bounds(z, x, y);
    GeoPoint {
        lat: (bounds.north + bounds.south) / 2.0,
        lng: (bounds.west + bounds.east) / 2.0,
    }
}

/// Computes the geographic bounds (west, south, east, north) of a tile.
pub fn tile_to_lng_lat_bounds(z: u8, x: i64, y: i64) -> LngLatBounds {
    let n = 2.0_f64.powi(z as i32);
    let (x, y) = (x as f64, y as f64);

    LngLatBounds {
        west: tile_x_to_lng(x, n),
        east: tile_x_to_lng(x + 1.0, n),
        north: tile_y_to_lat(y, n),
        south: tile_y_to_lat(y + 1.0, n),
    }
}

/// Clamps a latitude to the Web Mercator limits.
#[inline]
pub fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(MIN_MERCATOR_LAT, MAX_MERCATOR_LAT)
}

/// Column containing `lng`, clamped to the last column at 180°.
#[inline]
fn lng_to_tile_x(lng: f64, n: f64) -> u32 {
    let col = ((lng + 180.0) / 360.0 * n).floor();
    col.clamp(0.0, n - 1.0) as u32
}

/// Row containing `lat` (already clamped to the Mercator range).
#[inline]
fn lat_to_tile_y(lat: f64, n: f64) -> u32 {
    let lat_rad = lat.to_radians();
    let row = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor();
    row.clamp(0.0, n - 1.0) as u32
}

fn validate(lng: f64, zoom: u8) -> Result<(), CoordError> {
    if !(MIN_LNG..=MAX_LNG).contains(&lng) {
        return Err(CoordError::InvalidLongitude(lng));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }
    Ok(())
}

/// Converts a geographic point to the tile containing it.
///
/// Latitude is clamped to the Mercator range rather than rejected, so polar
/// points land on the first or last row.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees
/// * `lng` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level (0 to 24)
///
/// # Returns
///
/// A `Result` containing the tile coordinates or an error if inputs are invalid.
#[inline]
pub fn point_to_tile(lat: f64, lng: f64, zoom: u8) -> Result<TileCoord, CoordError> {
    validate(lng, zoom)?;

    let n = 2.0_f64.powi(zoom as i32);

    Ok(TileCoord {
        z: zoom,
        x: lng_to_tile_x(lng, n),
        y: lat_to_tile_y(clamp_lat(lat), n),
    })
}

/// Column and row ranges of the radius grid, clipped to the world.
///
/// Either range is empty when `center` itself lies off the world.
fn radius_ranges(center: TileCoord, radius: u32) -> (RangeInclusive<u32>, RangeInclusive<u32>) {
    let max_tile = center
        .tiles_per_axis()
        .saturating_sub(1)
        .min(u32::MAX as u64) as u32;
    let span = |c: u32| c.saturating_sub(radius)..=c.saturating_add(radius).min(max_tile);
    (span(center.x), span(center.y))
}

/// Number of tiles in the product of two ranges.
fn tile_count(xs: &RangeInclusive<u32>, ys: &RangeInclusive<u32>) -> u64 {
    let len = |r: &RangeInclusive<u32>| {
        if r.is_empty() {
            0
        } else {
            (*r.end() as u64 - *r.start() as u64) + 1
        }
    };
    len(xs).saturating_mul(len(ys))
}

fn check_tile_count(count: u64) -> Result<(), CoordError> {
    if count > MAX_TILES_PER_QUERY {
        return Err(CoordError::TooManyTiles {
            count,
            limit: MAX_TILES_PER_QUERY,
        });
    }
    Ok(())
}

/// Generates every tile within `radius` columns and rows of `center`.
///
/// Tiles that would fall outside the world at this zoom are skipped, so a
/// grid near the map edge holds fewer than `cols * rows` tiles. Tiles are
/// listed column by column, north to south within a column. Callers holding
/// untrusted radii should go through [`tiles_in_radius_from_point`], which
/// enforces [`MAX_TILES_PER_QUERY`].
pub fn tiles_in_radius(center: TileCoord, radius: u32) -> TileGrid {
    let (xs, ys) = radius_ranges(center, radius);
    let count = tile_count(&xs, &ys).min(MAX_TILES_PER_QUERY) as usize;
    let mut tiles = Vec::with_capacity(count);

    for x in xs {
        for y in ys.clone() {
            tiles.push(TileCoord { z: center.z, x, y });
        }
    }

    let side = radius.saturating_mul(2).saturating_add(1);
    TileGrid {
        zoom: center.z,
        tiles,
        cols: side,
        rows: side,
    }
}

/// Generates the tile grid around the tile containing a point.
///
/// Fails with [`CoordError::TooManyTiles`] when the grid, after clipping to
/// the world, would exceed [`MAX_TILES_PER_QUERY`].
pub fn tiles_in_radius_from_point(
    lat: f64,
    lng: f64,
    radius: u32,
    zoom: u8,
) -> Result<TileGrid, CoordError> {
    let center = point_to_tile(lat, lng, zoom)?;
    let (xs, ys) = radius_ranges(center, radius);
    check_tile_count(tile_count(&xs, &ys))?;
    Ok(tiles_in_radius(center, radius))
}

/// Enumerates all tiles that intersect a viewport at a given zoom.
///
/// A viewport crossing the antimeridian is split in two and each part is
/// enumerated in turn, western part first. Viewports covering more than
/// [`MAX_TILES_PER_QUERY`] tiles are rejected before anything is allocated.
pub fn tiles_intersecting_bbox(
    bbox: &ViewportBbox,
    zoom: u8,
) -> Result<Vec<TileCoord>, CoordError> {
    validate(bbox.min_lng, zoom)?;
    validate(bbox.max_lng, zoom)?;

    let n = 2.0_f64.powi(zoom as i32);

    // Rows grow southward, so the north edge gives the smaller row
    let ranges: Vec<_> = bbox
        .split_at_dateline()
        .into_iter()
        .map(|part| {
            let xs = lng_to_tile_x(part.min_lng, n)..=lng_to_tile_x(part.max_lng, n);
            let ys = lat_to_tile_y(clamp_lat(part.max_lat), n)
                ..=lat_to_tile_y(clamp_lat(part.min_lat), n);
            (xs, ys)
        })
        .collect();

    let count = ranges
        .iter()
        .fold(0u64, |acc, (xs, ys)| acc.saturating_add(tile_count(xs, ys)));
    check_tile_count(count)?;

    let mut tiles = Vec::with_capacity(count as usize);
    for (xs, ys) in ranges {
        for x in xs {
            for y in ys.clone() {
                tiles.push(TileCoord { z: zoom, x, y });
            }
        }
    }

    Ok(tiles)
}

/// Converts a pixel position within a downloaded tile image to lng/lat.
///
/// The downloaded image may be larger than the base tile (a 512px tile
/// fetched `@2x` is 1024px wide); the pixel is normalized against the image
/// size so any resolution maps onto the same tile extent.
pub fn pixel_on_tile_to_lng_lat(
    tile: &TileCoord,
    px: f64,
    py: f64,
    image_w: f64,
    image_h: f64,
) -> GeoPoint {
    let n = 2.0_f64.powi(tile.z as i32);
    let frac_x = tile.x as f64 + px / image_w;
    let frac_y = tile.y as f64 + py / image_h;

    GeoPoint {
        lat: tile_y_to_lat(frac_y, n),
        lng: tile_x_to_lng(frac_x, n),
    }
}

impl TileCoord {
    /// Geographic center of this tile.
    #[inline]
    pub fn center(&self) -> GeoPoint {
        tile_center_lat_lng(self.z, self.x as i64, self.y as i64)
    }

    /// Geographic bounds of this tile.
    #[inline]
    pub fn bounds(&self) -> LngLatBounds {
        tile_to_lng_lat_bounds(self.z, self.x as i64, self.y as i64)
    }
}
