//! Reverse geocoding through the Mapbox places API.
//!
//! Turns a coordinate into a short place label for scan history. Geocoding is
//! best effort: every failure, a missing token included, degrades to a
//! formatted coordinate label instead of an error.

use serde::Deserialize;
use tracing::{debug, warn};

use super::http::HttpClient;
use super::types::ProviderError;
use crate::spatial::GeoPoint;

const PLACES_ENDPOINT: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    features: Vec<PlaceFeature>,
}

#[derive(Debug, Deserialize)]
struct PlaceFeature {
    place_name: String,
}

/// Label used when no place name can be resolved.
pub fn coordinate_label(point: GeoPoint) -> String {
    format!("{:.4}, {:.4}", point.lat, point.lng)
}

/// Builds the places lookup URL. Note the API takes `lng,lat` order.
fn places_url(point: GeoPoint, token: &str) -> String {
    format!(
        "{}/{},{}.json?access_token={}&types=place&limit=5",
        PLACES_ENDPOINT, point.lng, point.lat, token
    )
}

/// First comma-separated part of the first feature's place name.
fn place_label(body: &[u8]) -> Result<Option<String>, ProviderError> {
    let response: PlacesResponse = serde_json::from_slice(body)
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    Ok(response
        .features
        .first()
        .and_then(|feature| feature.place_name.split(',').next())
        .map(|part| part.trim().to_string())
        .filter(|label| !label.is_empty()))
}

/// Resolves coordinates to a human-readable place label.
pub struct ReverseGeocoder<C: HttpClient> {
    http_client: C,
    access_token: Option<String>,
}

impl<C: HttpClient> ReverseGeocoder<C> {
    /// Creates a geocoder using the given HTTP client and access token.
    pub fn new(http_client: C, access_token: Option<String>) -> Self {
        Self {
            http_client,
            access_token,
        }
    }

    /// Looks up the place containing `point`.
    ///
    /// A missing token, HTTP failure, unreadable body or empty result all
    /// fall back to [`coordinate_label`].
    pub fn reverse_geocode(&self, point: GeoPoint) -> String {
        let Some(token) = self.access_token.as_deref().filter(|t| !t.is_empty()) else {
            warn!(
                lat = point.lat,
                lng = point.lng,
                error = %ProviderError::MissingAccessToken,
                "skipping reverse geocode"
            );
            return coordinate_label(point);
        };

        debug!(
            url = %places_url(point, "***"),
            lat = point.lat,
            lng = point.lng,
            "reverse geocode request"
        );

        let label = match self.http_client.get(&places_url(point, token)) {
            Ok(body) => match place_label(&body) {
                Ok(label) => label,
                Err(e) => {
                    warn!(lat = point.lat, lng = point.lng, error = %e, "unreadable geocoding response");
                    None
                }
            },
            Err(e) => {
                warn!(lat = point.lat, lng = point.lng, error = %e, "geocoding request failed");
                None
            }
        };

        let label = label.unwrap_or_else(|| coordinate_label(point));
        debug!(lat = point.lat, lng = point.lng, result = %label, "reverse geocode response");
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockHttpClient;

    const POINT: GeoPoint = GeoPoint::new(37.77493, -122.41942);

    fn geocoder(response: Result<Vec<u8>, ProviderError>) -> ReverseGeocoder<MockHttpClient> {
        ReverseGeocoder::new(MockHttpClient::new(response), Some("pk.test".to_string()))
    }

    #[test]
    fn test_returns_first_part_of_place_name() {
        let body = br#"{"features": [
            {"place_name": "San Francisco, California, United States"},
            {"place_name": "Oakland, California, United States"}
        ]}"#;
        let geocoder = geocoder(Ok(body.to_vec()));

        assert_eq!(geocoder.reverse_geocode(POINT), "San Francisco");
    }

    #[test]
    fn test_request_url_is_lng_lat_ordered() {
        let geocoder = geocoder(Ok(br#"{"features": []}"#.to_vec()));
        geocoder.reverse_geocode(POINT);

        let url = geocoder.http_client.last_url().unwrap();
        assert!(url.starts_with(
            "https://api.mapbox.com/geocoding/v5/mapbox.places/-122.41942,37.77493.json"
        ));
        assert!(url.contains("access_token=pk.test"));
        assert!(url.ends_with("&types=place&limit=5"));
    }

    #[test]
    fn test_no_features_falls_back_to_coordinates() {
        let geocoder = geocoder(Ok(br#"{"features": []}"#.to_vec()));
        assert_eq!(geocoder.reverse_geocode(POINT), "37.7749, -122.4194");
    }

    #[test]
    fn test_http_error_falls_back_to_coordinates() {
        let geocoder = geocoder(Err(ProviderError::HttpError("HTTP 500".to_string())));
        assert_eq!(geocoder.reverse_geocode(POINT), "37.7749, -122.4194");
    }

    #[test]
    fn test_garbage_body_falls_back_to_coordinates() {
        let geocoder = geocoder(Ok(b"<html>".to_vec()));
        assert_eq!(geocoder.reverse_geocode(POINT), "37.7749, -122.4194");
    }

    #[test]
    fn test_missing_token_falls_back_without_request() {
        let geocoder = ReverseGeocoder::new(MockHttpClient::new(Ok(Vec::new())), None);
        assert_eq!(geocoder.reverse_geocode(POINT), "37.7749, -122.4194");
        assert!(geocoder.http_client.last_url().is_none());

        let geocoder =
            ReverseGeocoder::new(MockHttpClient::new(Ok(Vec::new())), Some(String::new()));
        assert_eq!(geocoder.reverse_geocode(POINT), "37.7749, -122.4194");
        assert!(geocoder.http_client.last_url().is_none());
    }
}
