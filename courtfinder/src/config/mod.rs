//! User configuration.
//!
//! Settings live in `~/.courtfinder/config.ini`. Every value has a default,
//! and `MAPBOX_API_KEY` in the environment overrides the stored token.

mod defaults;
mod file;
mod keys;

pub use defaults::*;
pub use file::{
    config_directory, config_file_path, ConfigFile, ConfigFileError, DedupSettings,
    LoggingSettings, MapboxSettings, ScanSettings,
};
pub use keys::{ConfigKey, ConfigKeyError};
