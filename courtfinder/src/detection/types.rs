//! Detection service payloads.

use serde::{Deserialize, Serialize};

/// A single object detected on a tile image.
///
/// Pixel fields describe the bounding box center and size in the coordinate
/// space of the submitted image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Bounding box center X in image pixels
    pub x: f64,
    /// Bounding box center Y in image pixels
    pub y: f64,
    /// Bounding box width in image pixels
    pub width: f64,
    /// Bounding box height in image pixels
    pub height: f64,
    /// Model confidence (0.0 to 1.0)
    pub confidence: f64,
    /// Facility class label, e.g. `tennis-court`
    pub class: String,
    /// Numeric class identifier
    pub class_id: u32,
    /// Identifier assigned by the detection service
    pub detection_id: String,
}

/// Dimensions of the image submitted for inference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

/// Full response from the detection service for one tile image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResponse {
    pub image: ImageSize,
    pub inference_id: String,
    pub predictions: Vec<Prediction>,
    /// Inference time in seconds
    pub time: f64,
}

impl InferenceResponse {
    /// Parse a response body.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "image": { "width": 1024, "height": 1024 },
        "inference_id": "abc-123",
        "time": 0.42,
        "predictions": [
            {
                "x": 512.5, "y": 300, "width": 40, "height": 80,
                "confidence": 0.91, "class": "tennis-court", "class_id": 4,
                "detection_id": "det-1"
            }
        ]
    }"#;

    #[test]
    fn test_parse_inference_response() {
        let response = InferenceResponse::from_json(SAMPLE.as_bytes()).unwrap();
        assert_eq!(response.image.width, 1024.0);
        assert_eq!(response.inference_id, "abc-123");
        assert_eq!(response.predictions.len(), 1);

        let p = &response.predictions[0];
        assert_eq!(p.class, "tennis-court");
        assert_eq!(p.class_id, 4);
        assert_eq!(p.x, 512.5);
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let result = InferenceResponse::from_json(br#"{"image": {"width": 1, "height": 1}}"#);
        assert!(result.is_err());
    }
}
