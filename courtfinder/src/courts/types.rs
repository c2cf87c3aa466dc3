//! Court records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coord::TileCoord;
use crate::spatial::GeoPoint;

/// Review state of a court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourtStatus {
    /// Confirmed by reviewer feedback
    Verified,
    /// Awaiting enough feedback to verify
    Pending,
}

impl CourtStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourtStatus::Verified => "verified",
            CourtStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for CourtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which courts a viewport query returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Verified,
    Pending,
}

impl StatusFilter {
    /// Whether a court with `status` passes this filter.
    #[inline]
    pub fn matches(&self, status: CourtStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Verified => status == CourtStatus::Verified,
            StatusFilter::Pending => status == CourtStatus::Pending,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "verified" => Ok(StatusFilter::Verified),
            "pending" => Ok(StatusFilter::Pending),
            other => Err(format!(
                "unknown status filter '{}' (expected all, verified or pending)",
                other
            )),
        }
    }
}

/// A sports facility placed on the map from a detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub id: String,
    pub class: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: CourtStatus,
    /// Tile the source detection was made on
    #[serde(default)]
    pub tile: Option<TileCoord>,
    /// Confidence of the detection that created this court
    #[serde(default)]
    pub source_confidence: Option<f64>,
    #[serde(default)]
    pub total_feedback_count: u32,
    #[serde(default)]
    pub positive_feedback_count: u32,
}

impl Court {
    /// Location of the court.
    #[inline]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}
