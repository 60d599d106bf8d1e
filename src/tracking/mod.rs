//! Tracking module
//!
//! The detector adapter boundary (landmark sets in, at the detector's own
//! cadence) and the adaptation layer that routes a detection result through
//! the kinematics solver, including the mirrored-feed hand channel swap.

pub mod adapter;
pub mod detector;

pub use adapter::{avatar_side, solve_frame, DetectedHand, HAND_CHANNEL_MAP};
pub use detector::{DetectionFrame, Detector, DetectorOptions, Landmark, VideoFrame};
