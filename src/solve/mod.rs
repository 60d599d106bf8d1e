//! Kinematic solve results
//!
//! The data model at the boundary between the external kinematics solver
//! (landmarks in, joint-space rotations out) and the retargeting engine.
//! Every category is optional per frame; an absent category means "hold
//! last pose" for the bones it drives.

use glam::Vec2;

use crate::skeleton::Side;
use crate::tracking::Landmark;

/// An Euler-angle rotation contribution in radians, intrinsic XYZ order.
///
/// Damping and blending parameters travel with the retargeting call, not
/// with the sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationSample {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A positional offset contribution in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PositionSample {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Per-eye openness as solved from the face landmarks: 1.0 fully open,
/// 0.0 fully closed. The facial retargeter inverts this into a closed
/// blend weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeOpenness {
    pub l: f32,
    pub r: f32,
}

impl Default for EyeOpenness {
    fn default() -> Self {
        Self { l: 1.0, r: 1.0 }
    }
}

/// Mouth shape over the five canonical visemes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouthShape {
    pub a: f32,
    pub i: f32,
    pub u: f32,
    pub e: f32,
    pub o: f32,
}

/// Output of the face solver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FaceSolveResult {
    pub head: RotationSample,
    pub eye: EyeOpenness,
    pub mouth: MouthShape,
    /// 2-D pupil/gaze direction
    pub pupil: Vec2,
}

/// Output of the body pose solver.
///
/// `left_wrist_z`/`right_wrist_z` carry the pose solver's view of wrist
/// roll; they are combined with the per-side hand solve when a hand is
/// present.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoseSolveResult {
    pub hips_rotation: RotationSample,
    pub hips_position: PositionSample,
    pub spine: RotationSample,
    pub left_upper_arm: RotationSample,
    pub left_lower_arm: RotationSample,
    pub right_upper_arm: RotationSample,
    pub right_lower_arm: RotationSample,
    pub left_upper_leg: RotationSample,
    pub left_lower_leg: RotationSample,
    pub right_upper_leg: RotationSample,
    pub right_lower_leg: RotationSample,
    pub left_wrist_z: f32,
    pub right_wrist_z: f32,
}

/// Output of the hand solver for one side: wrist X/Y plus one sample per
/// finger segment (thumb has two segments, the other fingers three).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandSolveResult {
    /// Only x and y are applied; wrist z comes from the pose solve.
    pub wrist: RotationSample,
    pub thumb_proximal: RotationSample,
    pub thumb_distal: RotationSample,
    pub index_proximal: RotationSample,
    pub index_intermediate: RotationSample,
    pub index_distal: RotationSample,
    pub middle_proximal: RotationSample,
    pub middle_intermediate: RotationSample,
    pub middle_distal: RotationSample,
    pub ring_proximal: RotationSample,
    pub ring_intermediate: RotationSample,
    pub ring_distal: RotationSample,
    pub little_proximal: RotationSample,
    pub little_intermediate: RotationSample,
    pub little_distal: RotationSample,
}

/// One frame's worth of solve results, the animator's input.
///
/// `left_hand`/`right_hand` are in AVATAR space: the detector adapter has
/// already performed the mirrored-feed hand swap (see
/// [`crate::tracking::adapter`]).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolvedFrame {
    pub face: Option<FaceSolveResult>,
    pub pose: Option<PoseSolveResult>,
    pub left_hand: Option<HandSolveResult>,
    pub right_hand: Option<HandSolveResult>,
}

impl SolvedFrame {
    pub fn is_empty(&self) -> bool {
        self.face.is_none()
            && self.pose.is_none()
            && self.left_hand.is_none()
            && self.right_hand.is_none()
    }
}

/// Context the solver needs about the source video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveContext {
    pub video_width: u32,
    pub video_height: u32,
}

/// External collaborator: translates raw detected keypoints into
/// joint-space rotations/positions and blendshape targets.
///
/// Every method is pure and may return `None`, which the caller treats as
/// "hold last pose" for that category.
pub trait KinematicsSolver: Send + Sync {
    fn solve_face(&self, landmarks: &[Landmark], ctx: &SolveContext) -> Option<FaceSolveResult>;

    fn solve_pose(
        &self,
        landmarks_3d: &[Landmark],
        landmarks_2d: &[Landmark],
        ctx: &SolveContext,
    ) -> Option<PoseSolveResult>;

    fn solve_hand(&self, landmarks: &[Landmark], side: Side) -> Option<HandSolveResult>;
}
