//! Typed configuration keys for `courtfinder config get/set`.
//!
//! Each key maps a dotted name such as `mapbox.zoom` to a field of
//! [`ConfigFile`], with the same validation the file loader applies.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use super::file::{
    parse_epsilon, parse_meters, parse_tile_radius, parse_tile_size, parse_zoom, ConfigFile,
};

/// Errors from looking up or setting a configuration key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigKeyError {
    #[error("Unknown configuration key: '{0}'")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// A settable configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    MapboxUsername,
    MapboxStyleId,
    MapboxTileSize,
    MapboxZoom,
    MapboxAccessToken,
    ScanTileRadius,
    DedupBaseRadius,
    DedupConfidenceTieEpsilon,
    LoggingDirectory,
    LoggingFile,
}

impl ConfigKey {
    /// Every key, in the order `config list` prints them.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::MapboxUsername,
            ConfigKey::MapboxStyleId,
            ConfigKey::MapboxTileSize,
            ConfigKey::MapboxZoom,
            ConfigKey::MapboxAccessToken,
            ConfigKey::ScanTileRadius,
            ConfigKey::DedupBaseRadius,
            ConfigKey::DedupConfidenceTieEpsilon,
            ConfigKey::LoggingDirectory,
            ConfigKey::LoggingFile,
        ]
    }

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::MapboxUsername
            | ConfigKey::MapboxStyleId
            | ConfigKey::MapboxTileSize
            | ConfigKey::MapboxZoom
            | ConfigKey::MapboxAccessToken => "mapbox",
            ConfigKey::ScanTileRadius => "scan",
            ConfigKey::DedupBaseRadius | ConfigKey::DedupConfidenceTieEpsilon => "dedup",
            ConfigKey::LoggingDirectory | ConfigKey::LoggingFile => "logging",
        }
    }

    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::MapboxUsername => "username",
            ConfigKey::MapboxStyleId => "style_id",
            ConfigKey::MapboxTileSize => "tile_size",
            ConfigKey::MapboxZoom => "zoom",
            ConfigKey::MapboxAccessToken => "access_token",
            ConfigKey::ScanTileRadius => "tile_radius",
            ConfigKey::DedupBaseRadius => "base_radius_m",
            ConfigKey::DedupConfidenceTieEpsilon => "confidence_tie_epsilon",
            ConfigKey::LoggingDirectory => "directory",
            ConfigKey::LoggingFile => "file",
        }
    }

    /// Dotted name, e.g. `mapbox.zoom`.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Whether the value should be masked when listed.
    pub fn is_secret(&self) -> bool {
        matches!(self, ConfigKey::MapboxAccessToken)
    }

    /// Current value as a string. Unset optional values are empty.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::MapboxUsername => config.mapbox.username.clone(),
            ConfigKey::MapboxStyleId => config.mapbox.style_id.clone(),
            ConfigKey::MapboxTileSize => config.mapbox.tile_size.to_string(),
            ConfigKey::MapboxZoom => config.mapbox.zoom.to_string(),
            ConfigKey::MapboxAccessToken => config.mapbox.access_token.clone().unwrap_or_default(),
            ConfigKey::ScanTileRadius => config.scan.tile_radius.to_string(),
            ConfigKey::DedupBaseRadius => config.dedup.base_radius_m.to_string(),
            ConfigKey::DedupConfidenceTieEpsilon => {
                config.dedup.confidence_tie_epsilon.to_string()
            }
            ConfigKey::LoggingDirectory => config.logging.directory.display().to_string(),
            ConfigKey::LoggingFile => config.logging.file.clone(),
        }
    }

    /// Validate `value` and store it in `config`.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        let fail = |reason: String| ConfigKeyError::ValidationFailed {
            key: self.name(),
            reason,
        };
        let value = value.trim();

        match self {
            ConfigKey::MapboxUsername => config.mapbox.username = non_empty(value).map_err(fail)?,
            ConfigKey::MapboxStyleId => config.mapbox.style_id = non_empty(value).map_err(fail)?,
            ConfigKey::MapboxTileSize => {
                config.mapbox.tile_size = parse_tile_size(value).map_err(fail)?
            }
            ConfigKey::MapboxZoom => config.mapbox.zoom = parse_zoom(value).map_err(fail)?,
            ConfigKey::MapboxAccessToken => {
                config.mapbox.access_token = (!value.is_empty()).then(|| value.to_string())
            }
            ConfigKey::ScanTileRadius => {
                config.scan.tile_radius = parse_tile_radius(value).map_err(fail)?
            }
            ConfigKey::DedupBaseRadius => {
                config.dedup.base_radius_m = parse_meters(value).map_err(fail)?
            }
            ConfigKey::DedupConfidenceTieEpsilon => {
                config.dedup.confidence_tie_epsilon = parse_epsilon(value).map_err(fail)?
            }
            ConfigKey::LoggingDirectory => {
                config.logging.directory = PathBuf::from(non_empty(value).map_err(fail)?)
            }
            ConfigKey::LoggingFile => config.logging.file = non_empty(value).map_err(fail)?,
        }

        Ok(())
    }
}

fn non_empty(value: &str) -> Result<String, String> {
    if value.is_empty() {
        Err("must not be empty".to_string())
    } else {
        Ok(value.to_string())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}
