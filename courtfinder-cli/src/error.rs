//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use courtfinder::config::{ConfigFileError, ConfigKeyError};
use courtfinder::coord::CoordError;
use courtfinder::provider::ProviderError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Coordinate or tile error
    Coord(CoordError),
    /// Mapbox request or URL error
    Provider(ProviderError),
    /// Failed to read an input file
    FileRead { path: String, error: std::io::Error },
    /// Input file did not contain the expected JSON
    InvalidInput { path: String, error: serde_json::Error },
    /// Failed to serialize output
    Output(serde_json::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::Provider(ProviderError::MissingAccessToken) = self {
            eprintln!();
            eprintln!("Set a Mapbox access token with one of:");
            eprintln!("  1. courtfinder config set mapbox.access_token <token>");
            eprintln!("  2. the MAPBOX_API_KEY environment variable");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Coord(e) => write!(f, "{}", e),
            CliError::Provider(e) => write!(f, "Mapbox error: {}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read '{}': {}", path, error)
            }
            CliError::InvalidInput { path, error } => {
                write!(f, "Invalid JSON in '{}': {}", path, error)
            }
            CliError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Coord(e) => Some(e),
            CliError::Provider(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::InvalidInput { error, .. } => Some(error),
            CliError::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::Coord(e)
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        CliError::Provider(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ConfigKeyError> for CliError {
    fn from(e: ConfigKeyError) -> Self {
        CliError::Config(e.to_string())
    }
}
