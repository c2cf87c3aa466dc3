//! Mapbox satellite style tiles.
//!
//! # API Endpoint
//!
//! `https://api.mapbox.com/styles/v1/{username}/{style_id}/tiles/{size}/{z}/{x}/{y}@2x?access_token={token}`
//!
//! The `@2x` suffix doubles the pixel resolution, so a 512px tile is
//! delivered as a 1024×1024 image.

use std::fmt;

use super::types::ProviderError;
use crate::coord::TileCoord;

/// Default Mapbox account hosting the style.
pub const DEFAULT_USERNAME: &str = "mapbox";

/// Default satellite style.
pub const DEFAULT_STYLE_ID: &str = "satellite-v9";

/// Base tile size of a Mapbox style tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TileSize {
    S256,
    #[default]
    S512,
}

impl TileSize {
    /// Size in pixels before the `@2x` scale.
    pub fn pixels(&self) -> u32 {
        match self {
            TileSize::S256 => 256,
            TileSize::S512 => 512,
        }
    }

    /// Size in pixels of the downloaded `@2x` image.
    pub fn image_pixels(&self) -> u32 {
        self.pixels() * 2
    }
}

impl TryFrom<u32> for TileSize {
    type Error = ProviderError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            256 => Ok(TileSize::S256),
            512 => Ok(TileSize::S512),
            other => Err(ProviderError::UnsupportedTileSize(other)),
        }
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

/// A Mapbox style to fetch raster tiles from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapboxStyle {
    pub username: String,
    pub style_id: String,
    pub tile_size: TileSize,
    pub access_token: Option<String>,
}

impl Default for MapboxStyle {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            style_id: DEFAULT_STYLE_ID.to_string(),
            tile_size: TileSize::default(),
            access_token: None,
        }
    }
}

impl MapboxStyle {
    /// Use the given access token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// The configured token, treating an empty string as missing.
    pub fn token(&self) -> Result<&str, ProviderError> {
        self.access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ProviderError::MissingAccessToken)
    }

    /// Builds the `@2x` raster tile URL for a tile.
    pub fn tile_url(&self, tile: &TileCoord) -> Result<String, ProviderError> {
        let token = self.token()?;
        Ok(format!(
            "https://api.mapbox.com/styles/v1/{}/{}/tiles/{}/{}/{}/{}@2x?access_token={}",
            self.username, self.style_id, self.tile_size, tile.z, tile.x, tile.y, token
        ))
    }
}
