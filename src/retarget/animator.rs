//! Full-body per-frame orchestration.
//!
//! Applies one frame's solve results to the skeleton in a fixed order:
//! face, pose, left hand, right hand. The steps write disjoint bones, so
//! the order matters for determinism rather than correctness. Absent
//! categories hold the last pose; there is no bind-pose reset.

use crate::config::RetargetTuning;
use crate::skeleton::{BoneId, Side, SkeletonBinding};
use crate::solve::{HandSolveResult, PoseSolveResult, PositionSample, RotationSample, SolvedFrame};

use super::face::FaceRig;
use super::rig::{rig_position, rig_rotation};

/// Root height added to the solved hip offset before blending.
const HIPS_HEIGHT_OFFSET: f32 = 1.0;

/// Per-session animator. Owns the facial retargeter and its gaze prior;
/// lives as long as the avatar session.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    face: FaceRig,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one frame of solve results to the skeleton.
    ///
    /// Hands combine the pose solver's wrist roll with the hand solver's
    /// wrist pitch/yaw, so a hand result is only applied on frames where a
    /// pose result is also present.
    pub fn animate_frame(
        &mut self,
        binding: &mut SkeletonBinding,
        frame: &SolvedFrame,
        tuning: &RetargetTuning,
    ) {
        if let Some(face) = &frame.face {
            self.face.apply(binding, face, tuning);
        }

        if let Some(pose) = &frame.pose {
            apply_pose(binding, pose, tuning);
        }

        if let (Some(hand), Some(pose)) = (&frame.left_hand, &frame.pose) {
            apply_hand(binding, hand, pose, Side::Left, tuning);
        }
        if let (Some(hand), Some(pose)) = (&frame.right_hand, &frame.pose) {
            apply_hand(binding, hand, pose, Side::Right, tuning);
        }
    }
}

fn apply_pose(binding: &mut SkeletonBinding, pose: &PoseSolveResult, tuning: &RetargetTuning) {
    rig_rotation(
        binding,
        BoneId::Hips,
        pose.hips_rotation,
        tuning.hips_rotation_dampener,
        tuning.default_blend,
    );
    // Root contract: the mirrored feed flips x/z, and the solver's hip
    // offset sits a standing height below the rig origin.
    rig_position(
        binding,
        BoneId::Hips,
        PositionSample::new(
            -pose.hips_position.x,
            pose.hips_position.y + HIPS_HEIGHT_OFFSET,
            -pose.hips_position.z,
        ),
        1.0,
        tuning.hips_position_blend,
    );

    // Chest and spine share one sample at different dampeners
    rig_rotation(
        binding,
        BoneId::Chest,
        pose.spine,
        tuning.chest_dampener,
        tuning.default_blend,
    );
    rig_rotation(
        binding,
        BoneId::Spine,
        pose.spine,
        tuning.spine_dampener,
        tuning.default_blend,
    );

    let limbs = [
        (BoneId::LeftUpperArm, pose.left_upper_arm),
        (BoneId::LeftLowerArm, pose.left_lower_arm),
        (BoneId::RightUpperArm, pose.right_upper_arm),
        (BoneId::RightLowerArm, pose.right_lower_arm),
        (BoneId::LeftUpperLeg, pose.left_upper_leg),
        (BoneId::LeftLowerLeg, pose.left_lower_leg),
        (BoneId::RightUpperLeg, pose.right_upper_leg),
        (BoneId::RightLowerLeg, pose.right_lower_leg),
    ];
    for (bone, sample) in limbs {
        rig_rotation(binding, bone, sample, tuning.limb_dampener, tuning.default_blend);
    }
}

fn apply_hand(
    binding: &mut SkeletonBinding,
    hand: &HandSolveResult,
    pose: &PoseSolveResult,
    side: Side,
    tuning: &RetargetTuning,
) {
    let wrist_z = match side {
        Side::Left => pose.left_wrist_z,
        Side::Right => pose.right_wrist_z,
    };
    let wrist_bone = match side {
        Side::Left => BoneId::LeftHand,
        Side::Right => BoneId::RightHand,
    };

    // Wrist pitch/yaw from the hand solve, roll from the pose solve
    rig_rotation(
        binding,
        wrist_bone,
        RotationSample::new(hand.wrist.x, hand.wrist.y, wrist_z),
        1.0,
        tuning.default_blend,
    );

    let fingers: [(BoneId, RotationSample); 14] = match side {
        Side::Left => [
            (BoneId::LeftRingProximal, hand.ring_proximal),
            (BoneId::LeftRingIntermediate, hand.ring_intermediate),
            (BoneId::LeftRingDistal, hand.ring_distal),
            (BoneId::LeftIndexProximal, hand.index_proximal),
            (BoneId::LeftIndexIntermediate, hand.index_intermediate),
            (BoneId::LeftIndexDistal, hand.index_distal),
            (BoneId::LeftMiddleProximal, hand.middle_proximal),
            (BoneId::LeftMiddleIntermediate, hand.middle_intermediate),
            (BoneId::LeftMiddleDistal, hand.middle_distal),
            (BoneId::LeftThumbProximal, hand.thumb_proximal),
            (BoneId::LeftThumbDistal, hand.thumb_distal),
            (BoneId::LeftLittleProximal, hand.little_proximal),
            (BoneId::LeftLittleIntermediate, hand.little_intermediate),
            (BoneId::LeftLittleDistal, hand.little_distal),
        ],
        Side::Right => [
            (BoneId::RightRingProximal, hand.ring_proximal),
            (BoneId::RightRingIntermediate, hand.ring_intermediate),
            (BoneId::RightRingDistal, hand.ring_distal),
            (BoneId::RightIndexProximal, hand.index_proximal),
            (BoneId::RightIndexIntermediate, hand.index_intermediate),
            (BoneId::RightIndexDistal, hand.index_distal),
            (BoneId::RightMiddleProximal, hand.middle_proximal),
            (BoneId::RightMiddleIntermediate, hand.middle_intermediate),
            (BoneId::RightMiddleDistal, hand.middle_distal),
            (BoneId::RightThumbProximal, hand.thumb_proximal),
            (BoneId::RightThumbDistal, hand.thumb_distal),
            (BoneId::RightLittleProximal, hand.little_proximal),
            (BoneId::RightLittleIntermediate, hand.little_intermediate),
            (BoneId::RightLittleDistal, hand.little_distal),
        ],
    };
    for (bone, sample) in fingers {
        rig_rotation(binding, bone, sample, 1.0, tuning.default_blend);
    }
}
