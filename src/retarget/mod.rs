//! Retargeting module
//!
//! Converts per-frame kinematic solve results into smoothed bone transforms
//! on the live skeleton: the rotation/position retargeters, the facial
//! retargeter, and the full-body animator that sequences them.

pub mod animator;
pub mod face;
pub mod rig;

pub use animator::Animator;
pub use face::{stabilize_blink, FaceRig};
pub use rig::{rig_position, rig_rotation, DEFAULT_BLEND};
