//! Object detections on satellite tiles.
//!
//! Parses the detection service's per-tile response and projects each
//! detection from image pixels onto the map as GeoJSON.

mod feature;
mod types;

pub use feature::{
    prediction_to_feature, Feature, FeatureCollection, FeatureOptions, Geometry,
    PredictionFeatures,
};
pub use types::{ImageSize, InferenceResponse, Prediction};
