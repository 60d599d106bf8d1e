//! Facial retargeting: head rotation, blink, visemes, and gaze.
//!
//! Blink and viseme weights are exponentially smoothed against the
//! expression channel's CURRENT value, read back from the skeleton each
//! frame and passed into the blend explicitly; the skeleton itself is the
//! filter history. The gaze low-pass keeps its prior state here instead,
//! frozen on frames without a face result.

use glam::Vec2;

use crate::config::RetargetTuning;
use crate::skeleton::{BoneId, ExpressionChannel, SkeletonBinding};
use crate::solve::FaceSolveResult;

use super::rig::rig_rotation;

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Yaw (radians) at which the far eye's landmarks start becoming
/// unreliable, ~23 degrees.
const OCCLUDE_START: f32 = 0.4;
/// Yaw past which only the near eye is trusted, ~34 degrees.
const OCCLUDE_FULL: f32 = 0.6;

/// Merge per-eye blink weights into the single applied weight, suppressing
/// false blinks while the head is turned.
///
/// Straight on, the eyes track together and the average cancels one-sided
/// landmark noise. As yaw grows past [`OCCLUDE_START`] the camera loses the
/// far eye, so the result blends toward the near eye alone, fully by
/// [`OCCLUDE_FULL`].
pub fn stabilize_blink(left: f32, right: f32, head_yaw: f32) -> f32 {
    let left = left.clamp(0.0, 1.0);
    let right = right.clamp(0.0, 1.0);

    let synced = (left + right) * 0.5;
    let near = if head_yaw >= 0.0 { left } else { right };

    let t = ((head_yaw.abs() - OCCLUDE_START) / (OCCLUDE_FULL - OCCLUDE_START)).clamp(0.0, 1.0);
    lerp(synced, near, t)
}

/// Facial retargeter. Owns the gaze prior; everything else keeps its
/// history on the skeleton's expression channels.
#[derive(Debug, Clone, Default)]
pub struct FaceRig {
    /// Previous look-at target (pitch, yaw)
    look_target: Vec2,
}

impl FaceRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one face solve result to the skeleton.
    pub fn apply(
        &mut self,
        binding: &mut SkeletonBinding,
        face: &FaceSolveResult,
        tuning: &RetargetTuning,
    ) {
        rig_rotation(
            binding,
            BoneId::Neck,
            face.head,
            tuning.head_dampener,
            tuning.default_blend,
        );

        // Blink: invert openness into a closed weight, blend against the
        // channel's current value, then stabilize against head yaw. The
        // same stabilized weight lands on both channels.
        let raw_l = (1.0 - face.eye.l).clamp(0.0, 1.0);
        let raw_r = (1.0 - face.eye.r).clamp(0.0, 1.0);
        let blended_l = lerp(
            raw_l,
            binding.expression(ExpressionChannel::BlinkLeft),
            tuning.blink_blend,
        );
        let blended_r = lerp(
            raw_r,
            binding.expression(ExpressionChannel::BlinkRight),
            tuning.blink_blend,
        );
        let blink = stabilize_blink(blended_l, blended_r, face.head.y);
        binding.set_expression(ExpressionChannel::BlinkLeft, blink);
        binding.set_expression(ExpressionChannel::BlinkRight, blink);

        // Visemes: fixed-ratio exponential smoothing per solve frame
        let visemes = [
            (ExpressionChannel::Aa, face.mouth.a),
            (ExpressionChannel::Ih, face.mouth.i),
            (ExpressionChannel::Ou, face.mouth.u),
            (ExpressionChannel::Ee, face.mouth.e),
            (ExpressionChannel::Oh, face.mouth.o),
        ];
        for (channel, raw) in visemes {
            let current = binding.expression(channel);
            binding.set_expression(channel, lerp(raw, current, tuning.mouth_blend));
        }

        // Gaze: pupil y drives look pitch, pupil x drives look yaw
        let target = Vec2::new(
            lerp(self.look_target.x, face.pupil.y, tuning.gaze_blend),
            lerp(self.look_target.y, face.pupil.x, tuning.gaze_blend),
        );
        self.look_target = target;
        binding.set_look_at(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solve::{EyeOpenness, MouthShape, RotationSample};

    fn tuning() -> RetargetTuning {
        RetargetTuning::default()
    }

    fn face_with_eyes(l: f32, r: f32, yaw: f32) -> FaceSolveResult {
        FaceSolveResult {
            head: RotationSample::new(0.0, yaw, 0.0),
            eye: EyeOpenness { l, r },
            ..Default::default()
        }
    }

    #[test]
    fn test_stabilize_blink_averages_when_facing_forward() {
        assert!((stabilize_blink(0.8, 0.4, 0.0) - 0.6).abs() < 1e-6);
        assert!((stabilize_blink(1.0, 1.0, 0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_stabilize_blink_trusts_near_eye_on_full_turn() {
        // Head turned well past the occlusion zone: only the near eye counts
        assert!((stabilize_blink(0.9, 0.1, 0.8) - 0.9).abs() < 1e-6);
        assert!((stabilize_blink(0.9, 0.1, -0.8) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_stabilize_blink_transition_zone() {
        // Halfway into the zone, halfway between average and near eye
        let mid_yaw = (OCCLUDE_START + OCCLUDE_FULL) * 0.5;
        let got = stabilize_blink(1.0, 0.0, mid_yaw);
        let expected = lerp(0.5, 1.0, 0.5);
        assert!((got - expected).abs() < 1e-6);
    }

    #[test]
    fn test_stabilize_blink_clamps_input() {
        assert!(stabilize_blink(1.7, 1.9, 0.0) <= 1.0);
        assert!(stabilize_blink(-0.5, -0.2, 0.0) >= 0.0);
    }

    #[test]
    fn test_blink_converges_geometrically() {
        // Constant fully-closed input: after N frames at factor 0.5 the
        // applied weight is within 2^-N of 1.0.
        let mut rig = FaceRig::new();
        let mut binding = SkeletonBinding::complete();
        let face = face_with_eyes(0.0, 0.0, 0.0);

        let n = 10;
        for _ in 0..n {
            rig.apply(&mut binding, &face, &tuning());
        }

        let weight = binding.expression(ExpressionChannel::BlinkLeft);
        let bound = 2f32.powi(-n);
        assert!(
            (1.0 - weight) <= bound + 1e-6,
            "weight {weight} not within 2^-{n} of 1.0"
        );
        assert_eq!(weight, binding.expression(ExpressionChannel::BlinkRight));
    }

    #[test]
    fn test_head_rotation_lands_on_neck() {
        let mut rig = FaceRig::new();
        let mut binding = SkeletonBinding::complete();
        let face = FaceSolveResult {
            head: RotationSample::new(0.2, -0.1, 0.05),
            ..Default::default()
        };

        rig.apply(&mut binding, &face, &tuning());

        let neck = binding.node(BoneId::Neck).unwrap().local_rotation;
        assert!(neck.angle_between(glam::Quat::IDENTITY) > 1e-4);
        // The head sample drives only the neck
        let hips = binding.node(BoneId::Hips).unwrap().local_rotation;
        assert_eq!(hips, glam::Quat::IDENTITY);
    }

    #[test]
    fn test_viseme_smoothing_is_half_steps() {
        let mut rig = FaceRig::new();
        let mut binding = SkeletonBinding::complete();
        let face = FaceSolveResult {
            mouth: MouthShape {
                a: 1.0,
                ..Default::default()
            },
            ..Default::default()
        };

        rig.apply(&mut binding, &face, &tuning());
        assert!((binding.expression(ExpressionChannel::Aa) - 0.5).abs() < 1e-6);

        rig.apply(&mut binding, &face, &tuning());
        assert!((binding.expression(ExpressionChannel::Aa) - 0.75).abs() < 1e-6);

        // Other visemes stay at rest
        assert_eq!(binding.expression(ExpressionChannel::Ee), 0.0);
    }

    #[test]
    fn test_gaze_prior_advances_toward_pupil() {
        let mut rig = FaceRig::new();
        let mut binding = SkeletonBinding::complete();
        let face = FaceSolveResult {
            pupil: Vec2::new(1.0, -1.0),
            ..Default::default()
        };

        rig.apply(&mut binding, &face, &tuning());
        // pupil.y -> pitch, pupil.x -> yaw, 40% per frame
        let look = binding.look_at();
        assert!((look.x - -0.4).abs() < 1e-6);
        assert!((look.y - 0.4).abs() < 1e-6);

        rig.apply(&mut binding, &face, &tuning());
        let look = binding.look_at();
        assert!((look.x - -0.64).abs() < 1e-6);
        assert!((look.y - 0.64).abs() < 1e-6);
    }

    #[test]
    fn test_blink_weight_clamped_on_malformed_openness() {
        let mut rig = FaceRig::new();
        let mut binding = SkeletonBinding::complete();
        // Openness far out of range must clamp, not reject
        let face = face_with_eyes(-3.0, 5.0, 0.0);

        rig.apply(&mut binding, &face, &tuning());

        let weight = binding.expression(ExpressionChannel::BlinkLeft);
        assert!((0.0..=1.0).contains(&weight));
    }
}
