//! Proximity matching of new detections against known courts.
//!
//! A detection close enough to a verified court of the same class is the
//! same facility seen again. "Close enough" depends on the facility: a
//! tennis court is small, a baseball diamond is not.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::types::{Court, CourtStatus};
use crate::spatial::{haversine_meters, GeoPoint};

/// Radius used for classes without an override (meters).
pub const DEFAULT_BASE_RADIUS_M: f64 = 20.0;

/// Confidence delta at or below which two detections are tied.
pub const DEFAULT_CONFIDENCE_TIE_EPSILON: f64 = 0.05;

/// Per-class proximity radii (meters).
pub const DEFAULT_CLASS_RADII_M: &[(&str, f64)] = &[
    ("basketball-court", 10.0),
    ("tennis-court", 8.0),
    ("soccer-ball-field", 16.0),
    ("baseball-diamond", 32.0),
    ("ground-track-field", 16.0),
];

/// Proximity rules for matching detections to courts.
#[derive(Debug, Clone, PartialEq)]
pub struct DedupConfig {
    /// Fallback radius in meters
    pub base_radius_m: f64,
    /// Radius overrides keyed by class label
    pub radius_by_class: HashMap<String, f64>,
    /// Confidence tie threshold
    pub confidence_tie_epsilon: f64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            base_radius_m: DEFAULT_BASE_RADIUS_M,
            radius_by_class: DEFAULT_CLASS_RADII_M
                .iter()
                .map(|(class, radius)| (class.to_string(), *radius))
                .collect(),
            confidence_tie_epsilon: DEFAULT_CONFIDENCE_TIE_EPSILON,
        }
    }
}

impl DedupConfig {
    /// Matching radius for a class.
    pub fn radius_for(&self, class: &str) -> f64 {
        self.radius_by_class
            .get(class)
            .copied()
            .unwrap_or(self.base_radius_m)
    }

    /// Whether two confidences are close enough to count as a tie.
    #[inline]
    pub fn is_confidence_tie(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.confidence_tie_epsilon
    }
}

/// The court a detection was matched to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyCourt {
    pub id: String,
    /// Distance from the detection in meters
    pub distance: f64,
}

/// Finds the nearest verified court of `class` within its matching radius.
///
/// Pending courts never match. On equal distances the first court wins.
pub fn find_nearby_court(
    courts: &[Court],
    point: GeoPoint,
    class: &str,
    config: &DedupConfig,
) -> Option<NearbyCourt> {
    let radius = config.radius_for(class);
    let mut nearest: Option<NearbyCourt> = None;

    for court in courts {
        if court.status != CourtStatus::Verified || court.class != class {
            continue;
        }

        let distance = haversine_meters(point, court.location());
        let closer = nearest
            .as_ref()
            .map_or(true, |best| distance < best.distance);

        if distance <= radius && closer {
            nearest = Some(NearbyCourt {
                id: court.id.clone(),
                distance,
            });
        }
    }

    if let Some(found) = &nearest {
        debug!(
            court_id = %found.id,
            distance_m = found.distance,
            radius_m = radius,
            class,
            "matched detection to court"
        );
    }

    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::meters_to_lat_degrees;

    fn court(id: &str, class: &str, point: GeoPoint, status: CourtStatus) -> Court {
        Court {
            id: id.to_string(),
            class: class.to_string(),
            latitude: point.lat,
            longitude: point.lng,
            status,
            tile: None,
            source_confidence: None,
            total_feedback_count: 0,
            positive_feedback_count: 0,
        }
    }

    /// A point `meters` north of `origin`.
    fn north_of(origin: GeoPoint, meters: f64) -> GeoPoint {
        GeoPoint::new(origin.lat + meters_to_lat_degrees(meters), origin.lng)
    }

    const ORIGIN: GeoPoint = GeoPoint::new(37.7749, -122.4194);

    #[test]
    fn test_radius_for_known_and_unknown_class() {
        let config = DedupConfig::default();
        assert_eq!(config.radius_for("tennis-court"), 8.0);
        assert_eq!(config.radius_for("baseball-diamond"), 32.0);
        assert_eq!(config.radius_for("swimming-pool"), DEFAULT_BASE_RADIUS_M);
    }

    #[test]
    fn test_confidence_tie() {
        let config = DedupConfig::default();
        assert!(config.is_confidence_tie(0.80, 0.84));
        assert!(!config.is_confidence_tie(0.80, 0.90));
    }

    #[test]
    fn test_matches_verified_court_within_radius() {
        let courts = vec![court(
            "c1",
            "tennis-court",
            north_of(ORIGIN, 5.0),
            CourtStatus::Verified,
        )];

        let found = find_nearby_court(&courts, ORIGIN, "tennis-court", &DedupConfig::default())
            .expect("court within 8m");
        assert_eq!(found.id, "c1");
        assert!(found.distance > 4.0 && found.distance < 6.0);
    }

    #[test]
    fn test_ignores_court_outside_class_radius() {
        // 12m is outside the tennis radius but inside the basketball radius
        let courts = vec![
            court("t", "tennis-court", north_of(ORIGIN, 12.0), CourtStatus::Verified),
            court("b", "basketball-court", north_of(ORIGIN, 12.0), CourtStatus::Verified),
        ];
        let config = DedupConfig::default();

        assert!(find_nearby_court(&courts, ORIGIN, "tennis-court", &config).is_none());
        assert!(find_nearby_court(&courts, ORIGIN, "basketball-court", &config).is_none());

        let wide = court("b", "baseball-diamond", north_of(ORIGIN, 12.0), CourtStatus::Verified);
        assert!(find_nearby_court(&[wide], ORIGIN, "baseball-diamond", &config).is_some());
    }

    #[test]
    fn test_ignores_pending_and_other_classes() {
        let courts = vec![
            court("p", "tennis-court", ORIGIN, CourtStatus::Pending),
            court("o", "basketball-court", ORIGIN, CourtStatus::Verified),
        ];
        let found = find_nearby_court(&courts, ORIGIN, "tennis-court", &DedupConfig::default());
        assert!(found.is_none());
    }

    #[test]
    fn test_picks_nearest_of_several() {
        let courts = vec![
            court("far", "soccer-ball-field", north_of(ORIGIN, 14.0), CourtStatus::Verified),
            court("near", "soccer-ball-field", north_of(ORIGIN, 3.0), CourtStatus::Verified),
            court("mid", "soccer-ball-field", north_of(ORIGIN, 9.0), CourtStatus::Verified),
        ];
        let found =
            find_nearby_court(&courts, ORIGIN, "soccer-ball-field", &DedupConfig::default()).unwrap();
        assert_eq!(found.id, "near");
    }

    #[test]
    fn test_equal_distance_keeps_first() {
        let courts = vec![
            court("first", "tennis-court", ORIGIN, CourtStatus::Verified),
            court("second", "tennis-court", ORIGIN, CourtStatus::Verified),
        ];
        let found = find_nearby_court(&courts, ORIGIN, "tennis-court", &DedupConfig::default()).unwrap();
        assert_eq!(found.id, "first");
        assert_eq!(found.distance, 0.0);
    }

    #[test]
    fn test_custom_base_radius() {
        let config = DedupConfig {
            base_radius_m: 100.0,
            ..DedupConfig::default()
        };
        let courts = vec![court("x", "hockey-rink", north_of(ORIGIN, 80.0), CourtStatus::Verified)];
        assert!(find_nearby_court(&courts, ORIGIN, "hockey-rink", &config).is_some());
    }
}
