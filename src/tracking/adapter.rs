//! Detection-to-solve adaptation, including the hand channel swap.
//!
//! The detector labels hands from the subject's own perspective as seen
//! through a mirrored camera feed, so its "right hand" landmark set drives
//! the AVATAR'S LEFT hand and vice versa. An un-swapped feed produces a
//! mirrored but plausible-looking (wrong) animation, so the mapping lives
//! here as an explicit table rather than an inline rename.

use crate::skeleton::Side;
use crate::solve::{KinematicsSolver, SolveContext, SolvedFrame};

use super::detector::DetectionFrame;

/// A hand landmark set as labelled by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedHand {
    Left,
    Right,
}

/// Detector hand label → avatar side.
pub const HAND_CHANNEL_MAP: [(DetectedHand, Side); 2] = [
    (DetectedHand::Left, Side::Right),
    (DetectedHand::Right, Side::Left),
];

/// The avatar side a detector-labelled hand binds to.
pub fn avatar_side(detected: DetectedHand) -> Side {
    match detected {
        DetectedHand::Left => Side::Right,
        DetectedHand::Right => Side::Left,
    }
}

/// Run the kinematics solver over one detection result.
///
/// Pose requires both the 2-D and 3-D landmark sets; hand landmark sets are
/// bound to their avatar side before solving. Every solver refusal becomes
/// an absent category in the output, which the animator treats as
/// hold-last-pose.
pub fn solve_frame<S: KinematicsSolver + ?Sized>(
    solver: &S,
    detection: &DetectionFrame,
    ctx: &SolveContext,
) -> SolvedFrame {
    let face = detection
        .face_landmarks
        .as_deref()
        .and_then(|landmarks| solver.solve_face(landmarks, ctx));

    let pose = match (&detection.pose_landmarks_3d, &detection.pose_landmarks_2d) {
        (Some(landmarks_3d), Some(landmarks_2d)) => {
            solver.solve_pose(landmarks_3d, landmarks_2d, ctx)
        }
        _ => None,
    };

    let mut left_hand = None;
    let mut right_hand = None;
    let channels = [
        (DetectedHand::Left, detection.left_hand_landmarks.as_deref()),
        (DetectedHand::Right, detection.right_hand_landmarks.as_deref()),
    ];
    for (detected, landmarks) in channels {
        let Some(landmarks) = landmarks else { continue };
        let side = avatar_side(detected);
        let solved = solver.solve_hand(landmarks, side);
        match side {
            Side::Left => left_hand = solved,
            Side::Right => right_hand = solved,
        }
    }

    SolvedFrame {
        face,
        pose,
        left_hand,
        right_hand,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solve::{FaceSolveResult, HandSolveResult, PoseSolveResult, RotationSample};
    use crate::tracking::Landmark;

    /// Solver that marks each result with which input it came from.
    struct TracingSolver;

    impl KinematicsSolver for TracingSolver {
        fn solve_face(&self, landmarks: &[Landmark], _ctx: &SolveContext) -> Option<FaceSolveResult> {
            Some(FaceSolveResult {
                head: RotationSample::new(landmarks[0].x, 0.0, 0.0),
                ..Default::default()
            })
        }

        fn solve_pose(
            &self,
            landmarks_3d: &[Landmark],
            _landmarks_2d: &[Landmark],
            _ctx: &SolveContext,
        ) -> Option<PoseSolveResult> {
            Some(PoseSolveResult {
                spine: RotationSample::new(landmarks_3d[0].x, 0.0, 0.0),
                ..Default::default()
            })
        }

        fn solve_hand(&self, landmarks: &[Landmark], _side: Side) -> Option<HandSolveResult> {
            Some(HandSolveResult {
                wrist: RotationSample::new(landmarks[0].x, 0.0, 0.0),
                ..Default::default()
            })
        }
    }

    fn ctx() -> SolveContext {
        SolveContext {
            video_width: 640,
            video_height: 480,
        }
    }

    #[test]
    fn test_hand_channel_map_matches_avatar_side() {
        for (detected, side) in HAND_CHANNEL_MAP {
            assert_eq!(avatar_side(detected), side);
        }
    }

    #[test]
    fn test_swap_is_a_bijection() {
        assert_ne!(
            avatar_side(DetectedHand::Left),
            avatar_side(DetectedHand::Right)
        );
    }

    #[test]
    fn test_detected_right_hand_drives_avatar_left() {
        let detection = DetectionFrame {
            right_hand_landmarks: Some(vec![Landmark::new(0.25, 0.0, 0.0)]),
            ..Default::default()
        };

        let frame = solve_frame(&TracingSolver, &detection, &ctx());
        let left = frame.left_hand.expect("avatar left hand should be solved");
        assert!((left.wrist.x - 0.25).abs() < 1e-6);
        assert!(frame.right_hand.is_none());
    }

    #[test]
    fn test_detected_left_hand_drives_avatar_right() {
        let detection = DetectionFrame {
            left_hand_landmarks: Some(vec![Landmark::new(0.75, 0.0, 0.0)]),
            ..Default::default()
        };

        let frame = solve_frame(&TracingSolver, &detection, &ctx());
        let right = frame.right_hand.expect("avatar right hand should be solved");
        assert!((right.wrist.x - 0.75).abs() < 1e-6);
        assert!(frame.left_hand.is_none());
    }

    #[test]
    fn test_pose_requires_both_landmark_sets() {
        let only_3d = DetectionFrame {
            pose_landmarks_3d: Some(vec![Landmark::new(0.1, 0.0, 0.0)]),
            ..Default::default()
        };
        assert!(solve_frame(&TracingSolver, &only_3d, &ctx()).pose.is_none());

        let both = DetectionFrame {
            pose_landmarks_3d: Some(vec![Landmark::new(0.1, 0.0, 0.0)]),
            pose_landmarks_2d: Some(vec![Landmark::new(0.2, 0.0, 0.0)]),
            ..Default::default()
        };
        assert!(solve_frame(&TracingSolver, &both, &ctx()).pose.is_some());
    }

    #[test]
    fn test_empty_detection_solves_nothing() {
        let frame = solve_frame(&TracingSolver, &DetectionFrame::default(), &ctx());
        assert!(frame.is_empty());
    }

    #[test]
    fn test_solver_refusal_becomes_absent() {
        struct RefusingSolver;
        impl KinematicsSolver for RefusingSolver {
            fn solve_face(&self, _: &[Landmark], _: &SolveContext) -> Option<FaceSolveResult> {
                None
            }
            fn solve_pose(
                &self,
                _: &[Landmark],
                _: &[Landmark],
                _: &SolveContext,
            ) -> Option<PoseSolveResult> {
                None
            }
            fn solve_hand(&self, _: &[Landmark], _: Side) -> Option<HandSolveResult> {
                None
            }
        }

        let detection = DetectionFrame {
            face_landmarks: Some(vec![Landmark::new(0.0, 0.0, 0.0)]),
            pose_landmarks_2d: Some(vec![Landmark::new(0.0, 0.0, 0.0)]),
            pose_landmarks_3d: Some(vec![Landmark::new(0.0, 0.0, 0.0)]),
            left_hand_landmarks: Some(vec![Landmark::new(0.0, 0.0, 0.0)]),
            right_hand_landmarks: Some(vec![Landmark::new(0.0, 0.0, 0.0)]),
        };

        let frame = solve_frame(&RefusingSolver, &detection, &ctx());
        assert!(frame.is_empty());
    }
}
