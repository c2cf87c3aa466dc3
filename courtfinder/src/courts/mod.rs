//! Courts: sports facilities promoted from detections.
//!
//! Holds the court record, matching of fresh detections against verified
//! courts, and the viewport listing the map renders.

mod dedup;
mod types;
mod viewport;

pub use dedup::{
    find_nearby_court, DedupConfig, NearbyCourt, DEFAULT_BASE_RADIUS_M, DEFAULT_CLASS_RADII_M,
    DEFAULT_CONFIDENCE_TIE_EPSILON,
};
pub use types::{Court, CourtStatus, StatusFilter};
pub use viewport::courts_in_viewport;
