//! Configuration file handling for ~/.courtfinder/config.ini.
//!
//! Loads and saves user configuration with sensible defaults. A missing file
//! is not an error; every setting has a default.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use super::defaults::*;
use crate::courts::{DedupConfig, DEFAULT_CLASS_RADII_M};
use crate::coord::MAX_ZOOM;
use crate::provider::{MapboxStyle, ProviderError, TileSize};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

/// `[mapbox]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct MapboxSettings {
    pub username: String,
    pub style_id: String,
    pub tile_size: u32,
    pub zoom: u8,
    pub access_token: Option<String>,
}

impl Default for MapboxSettings {
    fn default() -> Self {
        Self {
            username: DEFAULT_MAPBOX_USERNAME.to_string(),
            style_id: DEFAULT_MAPBOX_STYLE_ID.to_string(),
            tile_size: DEFAULT_TILE_SIZE,
            zoom: DEFAULT_SCAN_ZOOM,
            access_token: None,
        }
    }
}

/// `[scan]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    pub tile_radius: u32,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            tile_radius: DEFAULT_TILE_RADIUS,
        }
    }
}

/// `[dedup]` and `[dedup.radius]` sections.
#[derive(Debug, Clone, PartialEq)]
pub struct DedupSettings {
    pub base_radius_m: f64,
    pub confidence_tie_epsilon: f64,
    /// Per-class radius overrides in meters
    pub class_radii: BTreeMap<String, f64>,
}

impl Default for DedupSettings {
    fn default() -> Self {
        Self {
            base_radius_m: DEFAULT_DEDUP_BASE_RADIUS_M,
            confidence_tie_epsilon: DEFAULT_DEDUP_TIE_EPSILON,
            class_radii: DEFAULT_CLASS_RADII_M
                .iter()
                .map(|(class, radius)| (class.to_string(), *radius))
                .collect(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LOG_DIR),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

/// User configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub mapbox: MapboxSettings,
    pub scan: ScanSettings,
    pub dedup: DedupSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load configuration from the default path (~/.courtfinder/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        parse_ini(&ini)
    }

    /// Apply `MAPBOX_API_KEY` from the environment, if set and non-empty.
    pub fn with_env_overrides(self) -> Self {
        let token = std::env::var(MAPBOX_TOKEN_ENV).ok();
        self.with_token_override(token)
    }

    fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.mapbox.access_token = Some(token);
        }
        self
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        to_ini(self)
            .write_to_file(path)
            .map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// The Mapbox style described by the `[mapbox]` section.
    pub fn mapbox_style(&self) -> Result<MapboxStyle, ProviderError> {
        Ok(MapboxStyle {
            username: self.mapbox.username.clone(),
            style_id: self.mapbox.style_id.clone(),
            tile_size: TileSize::try_from(self.mapbox.tile_size)?,
            access_token: self.mapbox.access_token.clone(),
        })
    }

    /// Dedup rules described by the `[dedup]` sections.
    pub fn dedup_config(&self) -> DedupConfig {
        DedupConfig {
            base_radius_m: self.dedup.base_radius_m,
            radius_by_class: self
                .dedup
                .class_radii
                .iter()
                .map(|(class, radius)| (class.clone(), *radius))
                .collect(),
            confidence_tie_epsilon: self.dedup.confidence_tie_epsilon,
        }
    }

    /// Log directory, with relative paths resolved under the config directory.
    pub fn log_directory(&self) -> PathBuf {
        if self.logging.directory.is_absolute() {
            self.logging.directory.clone()
        } else {
            config_directory().join(&self.logging.directory)
        }
    }
}

/// Get the path to the config directory (~/.courtfinder).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".courtfinder")
}

/// Get the path to the config file (~/.courtfinder/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

fn invalid(section: &str, key: &str, value: &str, reason: impl Into<String>) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub(super) fn parse_tile_size(value: &str) -> Result<u32, String> {
    match value.trim() {
        "256" => Ok(256),
        "512" => Ok(512),
        _ => Err("must be 256 or 512".to_string()),
    }
}

pub(super) fn parse_zoom(value: &str) -> Result<u8, String> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|z| *z <= MAX_ZOOM)
        .ok_or_else(|| format!("must be an integer between 0 and {}", MAX_ZOOM))
}

pub(super) fn parse_tile_radius(value: &str) -> Result<u32, String> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|r| *r <= MAX_TILE_RADIUS)
        .ok_or_else(|| format!("must be an integer between 0 and {}", MAX_TILE_RADIUS))
}

pub(super) fn parse_meters(value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite() && *m >= 0.0)
        .ok_or_else(|| "must be a non-negative number of meters".to_string())
}

pub(super) fn parse_epsilon(value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|e| (0.0..=1.0).contains(e))
        .ok_or_else(|| "must be a number between 0 and 1".to_string())
}

/// Parse an `Ini` object into a `ConfigFile`.
fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    if let Some(section) = ini.section(Some("mapbox")) {
        if let Some(v) = section.get("username") {
            config.mapbox.username = v.trim().to_string();
        }
        if let Some(v) = section.get("style_id") {
            config.mapbox.style_id = v.trim().to_string();
        }
        if let Some(v) = section.get("tile_size") {
            config.mapbox.tile_size =
                parse_tile_size(v).map_err(|r| invalid("mapbox", "tile_size", v, r))?;
        }
        if let Some(v) = section.get("zoom") {
            config.mapbox.zoom = parse_zoom(v).map_err(|r| invalid("mapbox", "zoom", v, r))?;
        }
        if let Some(v) = section.get("access_token") {
            let v = v.trim();
            config.mapbox.access_token = (!v.is_empty()).then(|| v.to_string());
        }
    }

    if let Some(section) = ini.section(Some("scan")) {
        if let Some(v) = section.get("tile_radius") {
            config.scan.tile_radius =
                parse_tile_radius(v).map_err(|r| invalid("scan", "tile_radius", v, r))?;
        }
    }

    if let Some(section) = ini.section(Some("dedup")) {
        if let Some(v) = section.get("base_radius_m") {
            config.dedup.base_radius_m =
                parse_meters(v).map_err(|r| invalid("dedup", "base_radius_m", v, r))?;
        }
        if let Some(v) = section.get("confidence_tie_epsilon") {
            config.dedup.confidence_tie_epsilon = parse_epsilon(v)
                .map_err(|r| invalid("dedup", "confidence_tie_epsilon", v, r))?;
        }
    }

    if let Some(section) = ini.section(Some("dedup.radius")) {
        for (class, v) in section.iter() {
            let radius = parse_meters(v).map_err(|r| invalid("dedup.radius", class, v, r))?;
            config.dedup.class_radii.insert(class.trim().to_string(), radius);
        }
    }

    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            config.logging.directory = PathBuf::from(v.trim());
        }
        if let Some(v) = section.get("file") {
            config.logging.file = v.trim().to_string();
        }
    }

    Ok(config)
}

fn to_ini(config: &ConfigFile) -> Ini {
    let mut ini = Ini::new();

    ini.with_section(Some("mapbox"))
        .set("username", config.mapbox.username.as_str())
        .set("style_id", config.mapbox.style_id.as_str())
        .set("tile_size", config.mapbox.tile_size.to_string())
        .set("zoom", config.mapbox.zoom.to_string())
        .set(
            "access_token",
            config.mapbox.access_token.clone().unwrap_or_default(),
        );

    ini.with_section(Some("scan"))
        .set("tile_radius", config.scan.tile_radius.to_string());

    ini.with_section(Some("dedup"))
        .set("base_radius_m", config.dedup.base_radius_m.to_string())
        .set(
            "confidence_tie_epsilon",
            config.dedup.confidence_tie_epsilon.to_string(),
        );

    for (class, radius) in &config.dedup.class_radii {
        ini.with_section(Some("dedup.radius"))
            .set(class.as_str(), radius.to_string());
    }

    ini.with_section(Some("logging"))
        .set("directory", config.logging.directory.to_string_lossy())
        .set("file", config.logging.file.as_str());

    ini
}
