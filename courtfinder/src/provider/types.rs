//! Provider types

use std::fmt;

/// Errors that can occur during provider operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// HTTP request failed
    HttpError(String),
    /// No access token configured for a service that requires one
    MissingAccessToken,
    /// Invalid response data from provider
    InvalidResponse(String),
    /// Tile size other than 256 or 512
    UnsupportedTileSize(u32),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::MissingAccessToken => write!(
                f,
                "Mapbox access token is required (set MAPBOX_API_KEY or mapbox.access_token)"
            ),
            ProviderError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ProviderError::UnsupportedTileSize(size) => {
                write!(f, "Unsupported tile size {} (expected 256 or 512)", size)
            }
        }
    }
}

impl std::error::Error for ProviderError {}
