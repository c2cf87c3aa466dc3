//! External map services.
//!
//! Builds Mapbox satellite tile URLs for scans and resolves coordinates to
//! place names. Network access goes through [`HttpClient`] so tests can
//! substitute a mock.

mod geocoding;
mod http;
mod mapbox;
mod types;

pub use geocoding::{coordinate_label, ReverseGeocoder};
pub use http::{HttpClient, ReqwestClient};
pub use mapbox::{MapboxStyle, TileSize, DEFAULT_STYLE_ID, DEFAULT_USERNAME};
pub use types::ProviderError;

#[cfg(test)]
pub use http::tests::MockHttpClient;
