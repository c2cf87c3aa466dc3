//! GeoJSON features for detections.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::types::{ImageSize, Prediction};
use crate::coord::{pixel_on_tile_to_lng_lat, TileCoord};
use crate::spatial::GeoPoint;

/// GeoJSON geometry. Positions are `[lng, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

impl Geometry {
    /// A point geometry at `p`.
    pub fn point(p: GeoPoint) -> Self {
        Geometry::Point {
            coordinates: [p.lng, p.lat],
        }
    }

    /// A single-ring polygon. The ring is closed if the caller did not.
    pub fn polygon(ring: &[GeoPoint]) -> Self {
        let mut positions: Vec<[f64; 2]> = ring.iter().map(|p| [p.lng, p.lat]).collect();
        if let Some(&first) = positions.first() {
            if positions.last() != Some(&first) {
                positions.push(first);
            }
        }
        Geometry::Polygon {
            coordinates: vec![positions],
        }
    }
}

/// A GeoJSON feature with free-form properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Map<String, Value>,
}

/// A GeoJSON feature collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// Options for [`prediction_to_feature`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureOptions {
    /// Also build the bounding-box polygon
    pub include_polygon: bool,
}

/// Features derived from one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionFeatures {
    /// Point at the bounding box center
    pub point: Feature,
    /// Bounding box outline, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polygon: Option<Feature>,
}

/// Properties shared by the point and polygon features of a prediction.
fn prediction_properties(tile: &TileCoord, prediction: &Prediction) -> Map<String, Value> {
    let value = json!({
        "z": tile.z,
        "x": tile.x,
        "y": tile.y,
        "class": prediction.class,
        "class_id": prediction.class_id,
        "confidence": prediction.confidence,
        "detection_id": prediction.detection_id,
    });

    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Converts a prediction into GeoJSON features relative to its tile.
///
/// The point sits at the bounding box center. When requested, the polygon
/// traces the box corners NW, NE, SE, SW and closes back at NW.
///
/// # Arguments
///
/// * `tile` - Tile the image was downloaded for
/// * `prediction` - Detection in image pixel space
/// * `image` - Size of the image the detection service saw
/// * `options` - Whether to include the polygon
pub fn prediction_to_feature(
    tile: &TileCoord,
    prediction: &Prediction,
    image: ImageSize,
    options: FeatureOptions,
) -> PredictionFeatures {
    let to_geo = |px: f64, py: f64| {
        pixel_on_tile_to_lng_lat(tile, px, py, image.width, image.height)
    };

    let properties = prediction_properties(tile, prediction);
    let center = to_geo(prediction.x, prediction.y);

    let point = Feature {
        geometry: Geometry::point(center),
        properties: properties.clone(),
    };

    if !options.include_polygon {
        return PredictionFeatures {
            point,
            polygon: None,
        };
    }

    let left = prediction.x - prediction.width / 2.0;
    let right = prediction.x + prediction.width / 2.0;
    let top = prediction.y - prediction.height / 2.0;
    let bottom = prediction.y + prediction.height / 2.0;

    let ring = [
        to_geo(left, top),
        to_geo(right, top),
        to_geo(right, bottom),
        to_geo(left, bottom),
    ];

    PredictionFeatures {
        point,
        polygon: Some(Feature {
            geometry: Geometry::polygon(&ring),
            properties,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tennis_court() -> Prediction {
        Prediction {
            x: 512.0,
            y: 512.0,
            width: 64.0,
            height: 32.0,
            confidence: 0.87,
            class: "tennis-court".to_string(),
            class_id: 4,
            detection_id: "det-42".to_string(),
        }
    }

    const IMAGE: ImageSize = ImageSize {
        width: 1024.0,
        height: 1024.0,
    };

    #[test]
    fn test_point_only_by_default() {
        let tile = TileCoord::new(16, 19295, 24640);
        let features = prediction_to_feature(&tile, &tennis_court(), IMAGE, FeatureOptions::default());

        assert!(features.polygon.is_none());
        match features.point.geometry {
            Geometry::Point { coordinates } => {
                let center = tile.center();
                assert!((coordinates[0] - center.lng).abs() < 1e-9);
                assert!((coordinates[1] - center.lat).abs() < 1e-5);
            }
            _ => panic!("expected point geometry"),
        }
    }

    #[test]
    fn test_properties_carry_tile_and_detection() {
        let tile = TileCoord::new(16, 19295, 24640);
        let features = prediction_to_feature(&tile, &tennis_court(), IMAGE, FeatureOptions::default());
        let props = &features.point.properties;

        assert_eq!(props["z"], 16);
        assert_eq!(props["x"], 19295);
        assert_eq!(props["y"], 24640);
        assert_eq!(props["class"], "tennis-court");
        assert_eq!(props["class_id"], 4);
        assert_eq!(props["detection_id"], "det-42");
    }

    #[test]
    fn test_polygon_is_closed_ring_around_point() {
        let tile = TileCoord::new(16, 19295, 24640);
        let options = FeatureOptions {
            include_polygon: true,
        };
        let features = prediction_to_feature(&tile, &tennis_court(), IMAGE, options);
        let polygon = features.polygon.expect("polygon requested");

        let ring = match polygon.geometry {
            Geometry::Polygon { coordinates } => coordinates[0].clone(),
            _ => panic!("expected polygon geometry"),
        };
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);

        // NW is west and north of SE
        let (nw, se) = (ring[0], ring[2]);
        assert!(nw[0] < se[0]);
        assert!(nw[1] > se[1]);

        // Box is wider than tall
        assert!((ring[1][0] - ring[0][0]) > 0.0);
        assert_eq!(ring[0][1], ring[1][1]);
    }

    #[test]
    fn test_feature_serializes_as_geojson() {
        let tile = TileCoord::new(16, 1, 2);
        let features = prediction_to_feature(&tile, &tennis_court(), IMAGE, FeatureOptions::default());
        let json = serde_json::to_value(&features.point).unwrap();

        assert_eq!(json["type"], "Feature");
        assert_eq!(json["geometry"]["type"], "Point");
        assert!(json["geometry"]["coordinates"].is_array());
    }

    #[test]
    fn test_feature_collection_tag() {
        let json = serde_json::to_value(FeatureCollection::default()).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"].as_array().map(|a| a.len()), Some(0));
    }

    #[test]
    fn test_polygon_closes_open_ring() {
        let ring = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
        ];
        match Geometry::polygon(&ring) {
            Geometry::Polygon { coordinates } => {
                assert_eq!(coordinates[0].len(), 4);
                assert_eq!(coordinates[0][0], coordinates[0][3]);
            }
            _ => panic!("expected polygon"),
        }
    }
}
