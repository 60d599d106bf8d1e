//! kagami3d - Real-time avatar motion retargeting engine
//!
//! Drives a 3D humanoid avatar from streams of detected body, face, and
//! hand keypoints:
//! - Converts per-frame kinematic solve results into smoothed bone
//!   transforms on a live skeleton
//! - Composes independent pose / face / left-hand / right-hand solvers
//!   onto one skeleton without discontinuities
//! - Tolerates partial, noisy, and missing per-frame input (hold-last-pose)
//! - Manages a continuous render clock and a toggleable detection clock
//!   against one shared scene
//!
//! The keypoint detector, kinematics solver, renderer, and avatar asset
//! parser are external collaborators consumed through traits; see
//! [`tracking::Detector`], [`solve::KinematicsSolver`],
//! [`session::Renderer`], [`session::CaptureDevice`], and
//! [`avatar::AvatarLoader`].

pub mod avatar;
pub mod config;
pub mod error;
pub mod retarget;
pub mod session;
pub mod skeleton;
pub mod solve;
pub mod tracking;

pub use config::Config;
pub use error::{KagamiError, Result};
pub use session::{AvatarSession, CaptureState};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
