//! Viewport queries over courts.

use std::collections::HashSet;

use serde_json::{json, Value};
use tracing::debug;

use super::types::{Court, StatusFilter};
use crate::coord::{tiles_intersecting_bbox, CoordError, TileCoord, ViewportBbox};
use crate::detection::{Feature, FeatureCollection, Geometry};

/// Collects the courts visible in a viewport as GeoJSON points.
///
/// A court is visible when the tile its detection came from intersects the
/// viewport at `zoom`. Courts without a source tile are never listed.
pub fn courts_in_viewport(
    courts: &[Court],
    bbox: &ViewportBbox,
    zoom: u8,
    filter: StatusFilter,
) -> Result<FeatureCollection, CoordError> {
    let visible: HashSet<TileCoord> = tiles_intersecting_bbox(bbox, zoom)?.into_iter().collect();

    let features: Vec<Feature> = courts
        .iter()
        .filter(|court| filter.matches(court.status))
        .filter_map(|court| {
            let tile = court.tile?;
            visible.contains(&tile).then(|| court_feature(court, &tile))
        })
        .collect();

    debug!(
        zoom,
        visible_tiles = visible.len(),
        feature_count = features.len(),
        "listed courts in viewport"
    );

    Ok(FeatureCollection { features })
}

fn court_feature(court: &Court, tile: &TileCoord) -> Feature {
    let properties = match json!({
        "z": tile.z,
        "x": tile.x,
        "y": tile.y,
        "class": court.class,
        "class_id": 0,
        "confidence": court.source_confidence.unwrap_or(1.0),
        "detection_id": "",
        "status": court.status,
        "totalFeedbackCount": court.total_feedback_count,
        "positiveFeedbackCount": court.positive_feedback_count,
    }) {
        Value::Object(map) => map,
        _ => Default::default(),
    };

    Feature {
        geometry: Geometry::point(court.location()),
        properties,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::point_to_tile;
    use crate::courts::CourtStatus;

    fn court_at(id: &str, lat: f64, lng: f64, status: CourtStatus, zoom: u8) -> Court {
        Court {
            id: id.to_string(),
            class: "tennis-court".to_string(),
            latitude: lat,
            longitude: lng,
            status,
            tile: point_to_tile(lat, lng, zoom).ok(),
            source_confidence: Some(0.9),
            total_feedback_count: 3,
            positive_feedback_count: 2,
        }
    }

    fn sample() -> Vec<Court> {
        vec![
            court_at("nyc-verified", 40.7128, -74.0060, CourtStatus::Verified, 16),
            court_at("nyc-pending", 40.7130, -74.0058, CourtStatus::Pending, 16),
            court_at("london", 51.5074, -0.1278, CourtStatus::Verified, 16),
        ]
    }

    const NYC: ViewportBbox = ViewportBbox::new(40.70, -74.02, 40.72, -74.00);

    #[test]
    fn test_lists_courts_in_view() {
        let result = courts_in_viewport(&sample(), &NYC, 16, StatusFilter::All).unwrap();
        assert_eq!(result.features.len(), 2);
    }

    #[test]
    fn test_status_filter() {
        let verified = courts_in_viewport(&sample(), &NYC, 16, StatusFilter::Verified).unwrap();
        assert_eq!(verified.features.len(), 1);
        assert_eq!(verified.features[0].properties["status"], "verified");

        let pending = courts_in_viewport(&sample(), &NYC, 16, StatusFilter::Pending).unwrap();
        assert_eq!(pending.features.len(), 1);
        assert_eq!(pending.features[0].properties["status"], "pending");
    }

    #[test]
    fn test_court_without_tile_is_skipped() {
        let mut courts = sample();
        for court in &mut courts {
            court.tile = None;
        }
        let result = courts_in_viewport(&courts, &NYC, 16, StatusFilter::All).unwrap();
        assert!(result.features.is_empty());
    }

    #[test]
    fn test_confidence_defaults_to_one() {
        let mut courts = sample();
        courts[0].source_confidence = None;
        let result = courts_in_viewport(&courts[..1], &NYC, 16, StatusFilter::All).unwrap();
        assert_eq!(result.features[0].properties["confidence"], 1.0);
    }

    #[test]
    fn test_point_coordinates_are_lng_lat() {
        let result = courts_in_viewport(&sample()[..1], &NYC, 16, StatusFilter::All).unwrap();
        match &result.features[0].geometry {
            Geometry::Point { coordinates } => assert_eq!(*coordinates, [-74.0060, 40.7128]),
            _ => panic!("expected point"),
        }
    }
}
