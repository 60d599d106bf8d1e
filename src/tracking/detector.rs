//! Detector adapter boundary
//!
//! Types and traits at the edge between the engine and the external
//! keypoint detector. The engine never indexes into landmark lists; it only
//! routes them to the kinematics solver, so a [`DetectionFrame`] is carried
//! opaquely. Frames also deserialize from JSON for hosts that receive
//! detector output over a wire (e.g. a tracker subprocess).

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::error::{DetectorError, Result};

/// A single detected keypoint in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Detector's confidence that the point is visible, when provided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: None,
        }
    }
}

/// Detector inference options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorOptions {
    /// Landmark model complexity (0, 1, or 2)
    pub model_complexity: u8,
    /// Temporal landmark smoothing inside the detector
    pub smooth_landmarks: bool,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
    /// Refined iris/lips landmarks for the face mesh
    pub refine_face_landmarks: bool,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            model_complexity: 1,
            smooth_landmarks: true,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.7,
            refine_face_landmarks: true,
        }
    }
}

/// One processed frame's landmark sets. Any subset may be absent; absent
/// sets mean "hold last pose" for whatever they would have driven.
///
/// `left_hand_landmarks`/`right_hand_landmarks` carry the DETECTOR's labels,
/// which are mirrored relative to the avatar (see [`super::adapter`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionFrame {
    /// Screen-space pose landmarks, relative to video width/height
    pub pose_landmarks_2d: Option<Vec<Landmark>>,
    /// World-space pose landmarks, relative to hip distance in metres
    pub pose_landmarks_3d: Option<Vec<Landmark>>,
    pub face_landmarks: Option<Vec<Landmark>>,
    pub left_hand_landmarks: Option<Vec<Landmark>>,
    pub right_hand_landmarks: Option<Vec<Landmark>>,
}

impl DetectionFrame {
    /// Parse a frame from a detector's JSON packet.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| DetectorError::ResultParse(e.to_string()).into())
    }

    pub fn is_empty(&self) -> bool {
        self.pose_landmarks_2d.is_none()
            && self.pose_landmarks_3d.is_none()
            && self.face_landmarks.is_none()
            && self.left_hand_landmarks.is_none()
            && self.right_hand_landmarks.is_none()
    }
}

/// A captured video frame, opaque to the engine.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub data: Arc<[u8]>,
}

/// External collaborator: image → landmark sets, at its own cadence.
///
/// `submit` only enqueues a frame; results arrive later on the sink channel
/// registered with `set_result_sink` (the callback seam). The detection
/// lifecycle drops its receiver on stop, which closes every sink the
/// detector still holds.
pub trait Detector: Send {
    fn configure(&mut self, options: &DetectorOptions);

    fn set_result_sink(&mut self, sink: mpsc::Sender<DetectionFrame>);

    fn submit(&mut self, frame: VideoFrame) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = DetectorOptions::default();
        assert_eq!(options.model_complexity, 1);
        assert!(options.smooth_landmarks);
        assert!((options.min_detection_confidence - 0.7).abs() < 1e-6);
        assert!((options.min_tracking_confidence - 0.7).abs() < 1e-6);
        assert!(options.refine_face_landmarks);
    }

    #[test]
    fn test_parse_frame_json() {
        let json = r#"{
            "pose_landmarks_2d": [{"x": 0.5, "y": 0.25, "z": -0.1, "visibility": 0.99}],
            "face_landmarks": [{"x": 0.1, "y": 0.2, "z": 0.0}]
        }"#;

        let frame = DetectionFrame::from_json(json).unwrap();
        let pose = frame.pose_landmarks_2d.as_ref().unwrap();
        assert_eq!(pose.len(), 1);
        assert!((pose[0].x - 0.5).abs() < 1e-6);
        assert_eq!(pose[0].visibility, Some(0.99));

        let face = frame.face_landmarks.as_ref().unwrap();
        assert_eq!(face[0].visibility, None);

        assert!(frame.left_hand_landmarks.is_none());
        assert!(frame.right_hand_landmarks.is_none());
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_parse_empty_frame() {
        let frame = DetectionFrame::from_json("{}").unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = DetectionFrame::from_json("{oops").unwrap_err();
        assert!(matches!(
            err,
            crate::error::KagamiError::Detector(DetectorError::ResultParse(_))
        ));
    }
}
