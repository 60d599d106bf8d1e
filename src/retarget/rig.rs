//! Core bone retargeters: damped, blended rotation and position application.
//!
//! Both retargeters interpolate from the bone's CURRENT live transform, not
//! from the previous target, so the filter self-corrects even when solve
//! frames are skipped.

use glam::{EulerRot, Quat, Vec3};

use crate::skeleton::{BoneId, SkeletonBinding};
use crate::solve::{PositionSample, RotationSample};

/// Interpolation step used when a caller has no bone-specific factor.
pub const DEFAULT_BLEND: f32 = 0.3;

/// Damp a rotation sample and apply it to one bone via spherical
/// interpolation from the bone's current local rotation.
///
/// Unbound bones are skipped without touching anything else.
pub fn rig_rotation(
    binding: &mut SkeletonBinding,
    bone: BoneId,
    sample: RotationSample,
    dampener: f32,
    blend: f32,
) {
    let Some(node) = binding.node_mut(bone) else {
        return;
    };

    let target = Quat::from_euler(
        EulerRot::XYZ,
        sample.x * dampener,
        sample.y * dampener,
        sample.z * dampener,
    );
    node.local_rotation = node.local_rotation.slerp(target, blend);
}

/// Damp a position sample and apply it to one bone via linear interpolation
/// from the bone's current local position. Only the hip root is driven this
/// way; everything else conveys motion through rotation.
pub fn rig_position(
    binding: &mut SkeletonBinding,
    bone: BoneId,
    sample: PositionSample,
    dampener: f32,
    blend: f32,
) {
    let Some(node) = binding.node_mut(bone) else {
        return;
    };

    let target = Vec3::new(sample.x, sample.y, sample.z) * dampener;
    node.local_position = node.local_position.lerp(target, blend);
}
